use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::coupons::CouponError;
use crate::domain::{normalize_code, Coupon, CouponCreate};

/// Client for the coupon actor.
#[derive(Clone)]
pub struct CouponClient {
    inner: ResourceClient<Coupon>,
}

impl_basic_client!(CouponClient, Coupon, String, CouponError, coupon);

impl CouponClient {
    /// Active coupon matching `code` case-insensitively. When the stored set holds
    /// duplicates the most recently written one wins.
    #[instrument(skip(self))]
    pub async fn find_active(&self, code: &str) -> Result<Option<Coupon>, CouponError> {
        let coupons = self.all().await?;
        Ok(coupons.into_iter().rev().find(|coupon| coupon.matches(code)))
    }

    /// Like [`find_active`](Self::find_active) but a miss is an error.
    pub async fn validate(&self, code: &str) -> Result<Coupon, CouponError> {
        self.find_active(code)
            .await?
            .ok_or_else(|| CouponError::Invalid(normalize_code(code)))
    }

    /// Stores an active coupon, replacing one with the same code.
    #[instrument(skip(self))]
    pub async fn create(&self, code: &str, discount: i64) -> Result<Coupon, CouponError> {
        debug!("Sending request");
        let coupon = self.inner.create(CouponCreate::new(code, discount)).await?;
        info!(code = %coupon.code, discount = coupon.discount, "Coupon created");
        Ok(coupon)
    }

    /// Removes every stored coupon with this code.
    #[instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<bool, CouponError> {
        let code = normalize_code(code);
        let mut removed = false;
        while self.delete_coupon(code.clone()).await? {
            removed = true;
        }
        Ok(removed)
    }
}
