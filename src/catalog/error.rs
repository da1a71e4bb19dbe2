use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(u64),
    #[error("Menu item validation error: {0}")]
    Validation(String),
    #[error("Menu storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CatalogError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::Rejected(reason) => CatalogError::Validation(reason),
            FrameworkError::NotFound(id) => match id.parse() {
                Ok(id) => CatalogError::NotFound(id),
                Err(_) => CatalogError::Validation(format!("invalid menu item id: {id}")),
            },
            FrameworkError::Storage(e) => CatalogError::Storage(e.to_string()),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
