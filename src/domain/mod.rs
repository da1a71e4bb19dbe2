//! Business domain entities. Plain serializable data with no actor concerns.

pub mod coupon;
pub mod customer;
pub mod menu;
pub mod order;

pub use coupon::*;
pub use customer::*;
pub use menu::*;
pub use order::*;
