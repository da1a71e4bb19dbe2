use tracing::{debug, info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::CatalogError;
use crate::clients::{CatalogClient, CouponClient, OrderClient};
use crate::coupons::{payable_total, CouponError};
use crate::domain::{CategoryFilter, Contact, Coupon, MenuItem, Order, Profile};
use crate::orders::OrderError;

/// One customer's browsing session: the cart, the applied coupon and access to
/// the shared catalog, coupons and order history.
pub struct Session {
    catalog: CatalogClient,
    coupons: CouponClient,
    orders: OrderClient,
    cart: Cart,
    applied_coupon: Option<Coupon>,
}

impl Session {
    pub fn new(catalog: CatalogClient, coupons: CouponClient, orders: OrderClient) -> Self {
        Self {
            catalog,
            coupons,
            orders,
            cart: Cart::new(),
            applied_coupon: None,
        }
    }

    pub async fn menu(&self, filter: &CategoryFilter) -> Result<Vec<MenuItem>, CatalogError> {
        self.catalog.by_category(filter).await
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds one unit of a menu item. Returns `false` and leaves the cart alone
    /// when the id is not on the menu.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, item_id: u64) -> Result<bool, CatalogError> {
        match self.catalog.by_id(item_id).await? {
            Some(item) => {
                self.cart.add(&item);
                Ok(true)
            }
            None => {
                debug!("Unknown menu item, cart unchanged");
                Ok(false)
            }
        }
    }

    pub fn change_quantity(&mut self, item_id: u64, delta: i64) -> bool {
        self.cart.change_quantity(item_id, delta)
    }

    pub fn subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Replaces the applied coupon with the active coupon matching `code`.
    ///
    /// Any previously applied coupon is dropped first, so a failed attempt
    /// leaves no coupon applied.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&mut self, code: &str) -> Result<&Coupon, CouponError> {
        self.applied_coupon = None;
        match self.coupons.validate(code).await {
            Ok(coupon) => {
                info!(code = %coupon.code, discount = coupon.discount, "Coupon applied");
                Ok(self.applied_coupon.insert(coupon))
            }
            Err(e) => {
                warn!(error = %e, "Coupon rejected");
                Err(e)
            }
        }
    }

    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
    }

    /// Amount taken off by the applied coupon.
    pub fn discount(&self) -> u64 {
        self.subtotal() - self.payable_total()
    }

    pub fn payable_total(&self) -> u64 {
        payable_total(self.cart.subtotal(), self.applied_coupon.as_ref())
    }

    /// Places the order and, on success, empties the cart and drops the coupon.
    /// When the order could not be stored the cart is kept so the customer can
    /// retry; nothing was added to history in that case.
    #[instrument(skip(self, contact))]
    pub async fn checkout(&mut self, contact: Contact) -> Result<Order, OrderError> {
        let order = self
            .orders
            .create_order(self.cart.lines(), contact, self.applied_coupon.as_ref())
            .await?;
        self.reset();
        Ok(order)
    }

    /// Empties the cart and drops the applied coupon.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.applied_coupon = None;
    }

    /// Details to prefill the checkout form with.
    pub async fn saved_profile(&self) -> Option<Profile> {
        self.orders.profile().await
    }

    pub async fn has_active_order(&self) -> Result<bool, OrderError> {
        self.orders.has_active_order().await
    }

    pub async fn track_order(&self) -> Result<Option<Order>, OrderError> {
        self.orders.track_current().await
    }

    pub async fn find_order(&self, id: &str) -> Result<Option<Order>, OrderError> {
        self.orders.find_by_id(id.trim().to_string()).await
    }
}
