use uuid::Uuid;

use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};
use crate::storage::StoreKey;

/// Prefix of every order id.
pub const ORDER_ID_PREFIX: &str = "ORD";

/// Fresh order id: `ORD` followed by 32 uppercase hex digits.
pub fn new_order_id() -> String {
    format!(
        "{ORDER_ID_PREFIX}{}",
        Uuid::new_v4().simple().to_string().to_uppercase()
    )
}

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Action = OrderAction;
    type ActionResult = OrderStatus;

    const STORE_KEY: StoreKey = StoreKey::OrderHistory;

    fn id(&self) -> &String {
        &self.id
    }

    /// Materializes a new order in `pending` status.
    ///
    /// The total comes from the payload as already computed at checkout and is
    /// never recomputed from the lines.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        if payload.items.is_empty() {
            return Err("order has no items".to_string());
        }
        if payload.items.iter().any(|line| line.quantity == 0) {
            return Err("order line with zero quantity".to_string());
        }
        let contact = payload.contact;
        Ok(Self {
            id,
            name: contact.name,
            phone: contact.phone,
            address: contact.address,
            landmark: contact.landmark,
            payment: contact.payment,
            items: payload.items,
            total: payload.total,
            status: OrderStatus::Pending,
            timestamp: payload.placed_at,
            coupon: payload.coupon,
        })
    }

    /// Only the status is mutable after creation.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderStatus, String> {
        match action {
            OrderAction::Advance => {
                let next = self
                    .status
                    .next()
                    .ok_or_else(|| format!("order {} is already {}", self.id, self.status))?;
                self.status = next;
                Ok(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, OrderLine};
    use chrono::Utc;

    fn payload() -> OrderCreate {
        OrderCreate {
            contact: Contact::new("Ravi", "9999", "MG Road", "cash"),
            items: vec![OrderLine {
                menu_item_id: 1,
                name: "Margherita".into(),
                price: 299,
                quantity: 2,
            }],
            total: 598,
            coupon: None,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn order_ids_are_prefixed_and_distinct() {
        let a = new_order_id();
        let b = new_order_id();
        assert!(a.starts_with("ORD"));
        assert_eq!(a.len(), 35);
        assert_ne!(a, b);
    }

    #[test]
    fn create_starts_pending_and_rejects_empty() {
        let order = Order::from_create("ORD1".into(), payload()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 598);

        let empty = OrderCreate { items: Vec::new(), ..payload() };
        assert!(Order::from_create("ORD2".into(), empty).is_err());
    }

    #[test]
    fn status_update_changes_only_status() {
        let mut order = Order::from_create("ORD1".into(), payload()).unwrap();
        let before = order.clone();
        order
            .on_update(OrderPatch { status: Some(OrderStatus::Dispatched) })
            .unwrap();
        assert_eq!(order.status, OrderStatus::Dispatched);
        assert_eq!(Order { status: OrderStatus::Pending, ..order }, before);
    }

    #[test]
    fn advance_walks_forward_then_stops() {
        let mut order = Order::from_create("ORD1".into(), payload()).unwrap();
        assert_eq!(order.handle_action(OrderAction::Advance), Ok(OrderStatus::Preparing));
        assert_eq!(order.handle_action(OrderAction::Advance), Ok(OrderStatus::Dispatched));
        assert_eq!(order.handle_action(OrderAction::Advance), Ok(OrderStatus::Delivered));
        assert!(order.handle_action(OrderAction::Advance).is_err());
        assert_eq!(order.status, OrderStatus::Delivered);
    }
}
