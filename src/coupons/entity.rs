use crate::actor_framework::{Entity, Unsupported};
use crate::domain::{normalize_code, Coupon, CouponCreate};
use crate::storage::StoreKey;

/// Coupons are keyed by their normalized code and never edited in place;
/// re-creating a code replaces the stored coupon.
impl Entity for Coupon {
    type Id = String;
    type CreatePayload = CouponCreate;
    type Patch = Unsupported;
    type Action = Unsupported;
    type ActionResult = ();

    const STORE_KEY: StoreKey = StoreKey::Coupons;

    fn id(&self) -> &String {
        &self.code
    }

    fn from_create(code: String, payload: CouponCreate) -> Result<Self, String> {
        let coupon = payload.into_coupon()?;
        debug_assert_eq!(coupon.code, code);
        Ok(coupon)
    }

    fn on_update(&mut self, patch: Unsupported) -> Result<(), String> {
        match patch {}
    }

    fn handle_action(&mut self, action: Unsupported) -> Result<(), String> {
        match action {}
    }
}

/// Id assigned to a new coupon.
pub fn coupon_id(payload: &CouponCreate) -> String {
    normalize_code(&payload.code)
}
