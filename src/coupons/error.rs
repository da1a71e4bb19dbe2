use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Invalid coupon: {0}")]
    Invalid(String),
    #[error("Coupon validation error: {0}")]
    Validation(String),
    #[error("Coupon storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CouponError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::Rejected(reason) => CouponError::Validation(reason),
            FrameworkError::NotFound(code) => CouponError::Invalid(code),
            FrameworkError::Storage(e) => CouponError::Storage(e.to_string()),
            other => CouponError::ActorCommunicationError(other.to_string()),
        }
    }
}
