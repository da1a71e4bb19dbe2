use serde::{Deserialize, Serialize};

/// A named percentage discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub discount: u8,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    /// Builds an active coupon, normalizing the code.
    pub fn new(code: &str, discount: u8) -> Self {
        Self {
            code: normalize_code(code),
            discount: discount.min(100),
            active: true,
        }
    }

    /// Discount taken off `subtotal`, rounded down.
    pub fn discount_on(&self, subtotal: u64) -> u64 {
        subtotal * u64::from(self.discount.min(100)) / 100
    }

    pub fn matches(&self, code: &str) -> bool {
        self.active && self.code == normalize_code(code)
    }
}

/// Coupon codes compare case-insensitively and ignore surrounding whitespace.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Payload for creating a coupon from the admin prompt.
#[derive(Debug, Clone)]
pub struct CouponCreate {
    pub code: String,
    pub discount: i64,
}

impl CouponCreate {
    pub fn new(code: impl Into<String>, discount: i64) -> Self {
        Self {
            code: code.into(),
            discount,
        }
    }

    pub fn into_coupon(self) -> Result<Coupon, String> {
        let code = normalize_code(&self.code);
        if code.is_empty() {
            return Err("coupon code must not be empty".to_string());
        }
        let discount = u8::try_from(self.discount)
            .ok()
            .filter(|d| *d <= 100)
            .ok_or_else(|| format!("discount must be between 0 and 100, got {}", self.discount))?;
        Ok(Coupon {
            code,
            discount,
            active: true,
        })
    }
}
