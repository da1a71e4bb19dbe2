//! Read-side projections over order history: the customer ledger and the
//! admin dashboard numbers. Recomputed on every call, never stored.

use std::collections::{HashMap, HashSet};

use crate::domain::{CustomerAggregate, DashboardSummary, Order};

/// Folds `orders` (in history order) into one aggregate per phone number.
///
/// Orders without a phone are skipped. Name and address come from the latest
/// order of each customer.
pub fn aggregate(orders: &[Order]) -> HashMap<String, CustomerAggregate> {
    let mut customers: HashMap<String, CustomerAggregate> = HashMap::new();
    for order in orders {
        let phone = order.phone.trim();
        if phone.is_empty() {
            continue;
        }
        let entry = customers
            .entry(phone.to_string())
            .or_insert_with(|| CustomerAggregate {
                phone: phone.to_string(),
                name: String::new(),
                address: String::new(),
                landmark: String::new(),
                order_count: 0,
                lifetime_value: 0,
            });
        entry.name = order.name.clone();
        entry.address = order.address.clone();
        entry.landmark = order.landmark.clone();
        entry.order_count += 1;
        entry.lifetime_value += order.total;
    }
    customers
}

pub fn dashboard(orders: &[Order]) -> DashboardSummary {
    let unique_customers = orders
        .iter()
        .map(|order| order.phone.trim())
        .filter(|phone| !phone.is_empty())
        .collect::<HashSet<_>>()
        .len();
    DashboardSummary {
        total_orders: orders.len(),
        total_sales: orders.iter().map(|order| order.total).sum(),
        unique_customers,
    }
}
