//! In-memory shopping cart of one session. Never persisted.

use serde::Serialize;
use tracing::debug;

use crate::domain::{MenuItem, OrderLine};

/// A menu item snapshot taken when it was added, plus a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        u64::from(self.item.price) * u64::from(self.quantity)
    }

    /// Historical snapshot stored on the order.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            menu_item_id: self.item.id,
            name: self.item.name.clone(),
            price: self.item.price,
            quantity: self.quantity,
        }
    }
}

/// Line items keyed by menu item id, in the order they were first added.
///
/// Holds at most one line per id and never a line with quantity 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, snapshotting it on first add.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }
        debug!(item_id = item.id, "Added to cart");
    }

    /// Adds `delta` to the quantity of the line for `item_id`, removing the
    /// line once it reaches zero. Returns `false` when there is no such line.
    pub fn change_quantity(&mut self, item_id: u64, delta: i64) -> bool {
        let Some(position) = self.lines.iter().position(|line| line.item.id == item_id) else {
            return false;
        };
        let quantity = i64::from(self.lines[position].quantity).saturating_add(delta);
        if quantity <= 0 {
            self.lines.remove(position);
        } else {
            self.lines[position].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn subtotal(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units, shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
