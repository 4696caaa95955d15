//! Service error types.

use domain::CustomerError;
use repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur in the order service or while assembling it.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The builder was not given a repository the service needs.
    #[error("No {0} repository configured")]
    MissingRepository(&'static str),

    #[error("Order total overflows after {products} products")]
    TotalOverflow { products: usize },
}

impl ServiceError {
    /// Returns true when the failure was a lookup miss in a repository.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(e) if e.is_not_found())
    }
}

/// Errors returned by the tavern facade.
#[derive(Debug, Error)]
pub enum TavernError {
    #[error("error creating order: {0}")]
    Order(#[source] ServiceError),

    #[error("No order service configured")]
    MissingOrderService,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected_through_wrapping() {
        let err = ServiceError::from(RepositoryError::not_found("Product", "abc"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Repository error: Product not found: abc");

        let err = ServiceError::from(CustomerError::InvalidPerson);
        assert!(!err.is_not_found());
    }

    #[test]
    fn total_overflow_message() {
        let err = ServiceError::TotalOverflow { products: 2 };
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Order total overflows after 2 products");
    }

    #[test]
    fn tavern_error_wraps_order_failure() {
        let err = TavernError::Order(ServiceError::MissingRepository("product"));
        assert_eq!(
            err.to_string(),
            "error creating order: No product repository configured"
        );
    }
}
