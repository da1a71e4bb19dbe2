//! System orchestration, startup, and shutdown logic.

mod admin;
mod session;
pub mod storefront_system;
mod telemetry;

pub use admin::*;
pub use session::*;
pub use storefront_system::*;
pub use telemetry::*;
