//! Customer aggregate and related types.

mod aggregate;

pub use aggregate::Customer;

use thiserror::Error;

/// Errors that can occur while building or changing a customer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// The customer has no usable name.
    #[error("A customer must have a valid name")]
    InvalidPerson,
}
