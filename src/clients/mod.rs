//! Typed handles over the collection actors.

#[macro_use]
mod macros;
mod catalog_client;
mod coupon_client;
mod order_client;

pub use catalog_client::*;
pub use coupon_client::*;
pub use order_client::*;
