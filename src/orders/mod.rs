//! Order lifecycle: persisted history and the status state machine.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;
