//! Coupon engine: stored coupon set and discount arithmetic.

pub mod entity;
pub mod error;
mod pricing;

pub use entity::*;
pub use error::*;
pub use pricing::*;
