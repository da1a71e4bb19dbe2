use serde::Serialize;

/// Per-customer summary derived from order history. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerAggregate {
    pub phone: String,
    pub name: String,
    pub address: String,
    pub landmark: String,
    pub order_count: u32,
    pub lifetime_value: u64,
}

/// Headline numbers of the admin orders tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub total_sales: u64,
    pub unique_customers: usize,
}
