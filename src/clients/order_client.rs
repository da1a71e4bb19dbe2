use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::cart::CartLine;
use crate::coupons::payable_total;
use crate::domain::{Contact, Coupon, Order, OrderCreate, OrderPatch, OrderStatus, Profile};
use crate::orders::{OrderAction, OrderError};
use crate::storage::{StoreAdapter, StoreKey};

/// Client for the order history actor.
///
/// Checkout also maintains the two single-value records that hang off an
/// order: the saved profile and the last order id.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    store: StoreAdapter,
}

impl_client_methods!(OrderClient, Order, String, OrderError, order);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, store: StoreAdapter) -> Self {
        Self { inner, store }
    }

    /// Materializes and persists an order from the cart lines.
    ///
    /// The total is computed once here and frozen on the order. The contact
    /// overwrites the saved profile and the new id becomes the last order id;
    /// once the order is stored, failures of those two writes are only logged.
    #[instrument(skip(self, lines, contact, coupon), fields(lines = lines.len(), phone = %contact.phone))]
    pub async fn create_order(
        &self,
        lines: &[CartLine],
        contact: Contact,
        coupon: Option<&Coupon>,
    ) -> Result<Order, OrderError> {
        info!("Processing create_order request");
        if lines.is_empty() {
            error!("Cart is empty");
            return Err(OrderError::EmptyCart);
        }

        let subtotal: u64 = lines.iter().map(CartLine::line_total).sum();
        let total = payable_total(subtotal, coupon);
        let profile = Profile::from(&contact);
        let payload = OrderCreate {
            contact,
            items: lines.iter().map(CartLine::to_order_line).collect(),
            total,
            coupon: coupon.map(|coupon| coupon.code.clone()),
            placed_at: Utc::now(),
        };

        let order = self.inner.create(payload).await?;

        // The order is stored; from here on write failures are logged, not returned.
        if let Err(e) = self.store.write(StoreKey::Profile, &profile).await {
            warn!(order_id = %order.id, error = %e, "Saved profile not updated");
        }
        if let Err(e) = self.store.write_raw(StoreKey::LastOrderId, &order.id).await {
            warn!(order_id = %order.id, error = %e, "Last order id not updated");
        }

        info!(order_id = %order.id, subtotal, total, "Order placed");
        Ok(order)
    }

    /// Overwrites the status of an order. Any status may be set from any other.
    ///
    /// Returns `None` without touching the history when the id is unknown.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: String, status: OrderStatus) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        match self.inner.update(id, OrderPatch { status: Some(status) }).await {
            Ok(order) => {
                info!(order_id = %order.id, status = %order.status, "Order status updated");
                Ok(Some(order))
            }
            Err(FrameworkError::NotFound(_)) => {
                debug!("Unknown order, status update ignored");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Moves an order one step along pending, preparing, dispatched, delivered.
    ///
    /// # Errors
    /// [`OrderError::NotFound`] for an unknown id, [`OrderError::Validation`]
    /// for an order that is already delivered.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: String) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        let status = self.inner.perform_action(id, OrderAction::Advance).await?;
        info!(status = %status, "Order advanced");
        Ok(status)
    }

    pub async fn find_by_id(&self, id: String) -> Result<Option<Order>, OrderError> {
        self.get_order(id).await
    }

    /// Removes the whole order history.
    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner.clear().await?;
        info!("Order history cleared");
        Ok(())
    }

    pub async fn last_order_id(&self) -> Option<String> {
        self.store.read_raw(StoreKey::LastOrderId).await
    }

    /// Saved details of the most recent purchaser.
    pub async fn profile(&self) -> Option<Profile> {
        self.store.read_optional(StoreKey::Profile).await
    }

    /// The order behind the last order id, if it still exists.
    #[instrument(skip(self))]
    pub async fn track_current(&self) -> Result<Option<Order>, OrderError> {
        match self.last_order_id().await {
            Some(id) => self.get_order(id).await,
            None => Ok(None),
        }
    }

    /// True when the last placed order exists and is not yet delivered.
    pub async fn has_active_order(&self) -> Result<bool, OrderError> {
        Ok(self.track_current().await?.is_some_and(|order| order.is_active()))
    }
}
