use async_trait::async_trait;
use domain::{Customer, Product};

use crate::{CustomerId, ProductId, Result};

/// Persistence for [`Customer`] aggregates.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Fetches a customer, failing with `NotFound` when absent.
    async fn get(&self, id: CustomerId) -> Result<Customer>;

    /// Stores a new customer, failing with `AlreadyExists` on an id collision.
    async fn add(&self, customer: Customer) -> Result<()>;

    /// Replaces a stored customer, failing with `NotFound` when absent.
    /// Never inserts.
    async fn update(&self, customer: Customer) -> Result<()>;
}

/// Persistence for [`Product`] aggregates.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns every stored product, in no particular order.
    async fn get_all(&self) -> Result<Vec<Product>>;

    async fn get(&self, id: ProductId) -> Result<Product>;

    async fn add(&self, product: Product) -> Result<()>;

    async fn update(&self, product: Product) -> Result<()>;

    /// Removes a product.
    ///
    /// Whether an absent id is an error is up to the backend: the in-memory
    /// store reports `NotFound`, the document store succeeds silently.
    async fn delete(&self, id: ProductId) -> Result<()>;
}

/// Extension trait providing convenience methods for product repositories.
#[async_trait]
pub trait ProductRepositoryExt: ProductRepository {
    /// Adds products in order, stopping at the first failure.
    ///
    /// Products added before the failure stay stored.
    async fn add_all(&self, products: Vec<Product>) -> Result<()> {
        for product in products {
            self.add(product).await?;
        }
        Ok(())
    }
}

// Blanket implementation for all ProductRepository implementations
impl<T: ProductRepository + ?Sized> ProductRepositoryExt for T {}
