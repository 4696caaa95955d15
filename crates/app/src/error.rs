//! Application error type.

use domain::ProductError;
use repository::RepositoryError;
use services::{ServiceError, TavernError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    #[error("Menu error: {0}")]
    Menu(#[from] ProductError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Tavern error: {0}")]
    Tavern(#[from] TavernError),
}
