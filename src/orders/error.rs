use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order validation error: {0}")]
    Validation(String),
    #[error("Order storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::Rejected(reason) => OrderError::Validation(reason),
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Storage(e) => OrderError::Storage(e.to_string()),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
