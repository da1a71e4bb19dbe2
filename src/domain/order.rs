use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress of an order through the kitchen.
///
/// The variants are listed in their canonical forward order. Assignment is not
/// restricted to that order; [`OrderStatus::next`] is available to callers that
/// want to enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Dispatched,
    Delivered,
}

impl OrderStatus {
    /// Canonical forward order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Human label for dropdowns and badges.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Dispatched => "Dispatched",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// 1-based position on the tracking progress bar.
    pub fn step(&self) -> u8 {
        match self {
            OrderStatus::Pending => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Dispatched => 3,
            OrderStatus::Delivered => 4,
        }
    }

    pub fn badge_class(&self) -> String {
        format!("status-{}", self.as_str())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Following status in canonical order, `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Dispatched),
            OrderStatus::Dispatched => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// How the customer intends to pay. Free text from the form is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Cash,
    Online,
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
            PaymentMethod::Other(text) => text,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(text: String) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "online" => PaymentMethod::Online,
            _ => PaymentMethod::Other(text),
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(text: &str) -> Self {
        PaymentMethod::from(text.to_string())
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Historical snapshot of one purchased item. The price is what was charged,
/// not the current catalog price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "id")]
    pub menu_item_id: u64,
    pub name: String,
    pub price: u32,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> u64 {
        u64::from(self.price) * u64::from(self.quantity)
    }
}

/// Contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub landmark: String,
    pub payment: PaymentMethod,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        payment: impl Into<PaymentMethod>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            landmark: String::new(),
            payment: payment.into(),
        }
    }

    pub fn with_landmark(mut self, landmark: impl Into<String>) -> Self {
        self.landmark = landmark.into();
        self
    }
}

/// Saved details of the most recent purchaser, used to prefill checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub landmark: String,
}

impl From<&Contact> for Profile {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            landmark: contact.landmark.clone(),
        }
    }
}

/// A completed checkout. The total is frozen at creation; only `status` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub landmark: String,
    pub payment: PaymentMethod,
    pub items: Vec<OrderLine>,
    pub total: u64,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
}

impl Order {
    /// Sum of the line snapshots before any discount.
    pub fn items_subtotal(&self) -> u64 {
        self.items.iter().map(OrderLine::line_total).sum()
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Payload for creating an order; the id is assigned by the order actor.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub contact: Contact,
    pub items: Vec<OrderLine>,
    pub total: u64,
    pub coupon: Option<String>,
    pub placed_at: DateTime<Utc>,
}

/// Payload for updating an order.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
}
