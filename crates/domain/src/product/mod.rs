//! Product aggregate and related types.

mod aggregate;

pub use aggregate::Product;

use thiserror::Error;

use crate::Money;

/// Errors that can occur while building a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// Name or description is empty.
    #[error("Missing important values")]
    MissingValue,

    /// Prices cannot go below zero.
    #[error("Invalid price: {price} (must not be negative)")]
    NegativePrice { price: Money },
}
