//! Menu catalog: the persisted menu, its seed data and admin editor rules.

pub mod entity;
pub mod error;
mod seed;

pub use entity::*;
pub use error::*;
pub use seed::*;
