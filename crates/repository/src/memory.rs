use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Customer, Product};
use tokio::sync::RwLock;

use crate::{
    CustomerId, ProductId, RepositoryError, Result,
    store::{CustomerRepository, ProductRepository},
};

/// In-memory customer repository.
///
/// Reads and writes both go through the same lock. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored customers.
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get(&self, id: CustomerId) -> Result<Customer> {
        self.customers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Customer", id))
    }

    async fn add(&self, customer: Customer) -> Result<()> {
        let mut customers = self.customers.write().await;
        match customers.entry(customer.id()) {
            Entry::Occupied(_) => Err(RepositoryError::already_exists("Customer", customer.id())),
            Entry::Vacant(slot) => {
                tracing::debug!(customer_id = %customer.id(), "customer added");
                slot.insert(customer);
                Ok(())
            }
        }
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(&customer.id()) {
            Some(stored) => {
                *stored = customer;
                Ok(())
            }
            None => Err(RepositoryError::not_found("Customer", customer.id())),
        }
    }
}

/// In-memory product repository.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Product", id))
    }

    async fn add(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.entry(product.id()) {
            Entry::Occupied(_) => Err(RepositoryError::already_exists("Product", product.id())),
            Entry::Vacant(slot) => {
                tracing::debug!(product_id = %product.id(), name = %product.item().name, "product added");
                slot.insert(product);
                Ok(())
            }
        }
    }

    async fn update(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id()) {
            Some(stored) => {
                *stored = product;
                Ok(())
            }
            None => Err(RepositoryError::not_found("Product", product.id())),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        self.products
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Product", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductRepositoryExt;
    use domain::Money;

    fn beer() -> Product {
        Product::new("Beer", "A refreshing beer", Money::from_cents(199)).unwrap()
    }

    #[tokio::test]
    async fn customer_add_then_get() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new("Percy").unwrap();

        repo.add(customer.clone()).await.unwrap();

        let stored = repo.get(customer.id()).await.unwrap();
        assert_eq!(stored.id(), customer.id());
        assert_eq!(stored.name(), "Percy");
    }

    #[tokio::test]
    async fn customer_get_missing_is_not_found() {
        let repo = InMemoryCustomerRepository::new();
        let result = repo.get(CustomerId::new()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { entity: "Customer", .. })));
    }

    #[tokio::test]
    async fn customer_duplicate_add_leaves_store_unchanged() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new("Percy").unwrap();
        repo.add(customer.clone()).await.unwrap();

        let mut renamed = customer.clone();
        renamed.set_name("Someone Else").unwrap();
        let result = repo.add(renamed).await;

        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get(customer.id()).await.unwrap().name(), "Percy");
    }

    #[tokio::test]
    async fn customer_update_persists_new_name() {
        let repo = InMemoryCustomerRepository::new();
        let mut customer = Customer::new("Original Name").unwrap();
        repo.add(customer.clone()).await.unwrap();

        customer.set_name("Updated Name").unwrap();
        repo.update(customer.clone()).await.unwrap();

        assert_eq!(repo.get(customer.id()).await.unwrap().name(), "Updated Name");
    }

    #[tokio::test]
    async fn customer_update_missing_does_not_insert() {
        let repo = InMemoryCustomerRepository::new();
        let customer = Customer::new("Non Existing").unwrap();

        let result = repo.update(customer.clone()).await;

        assert!(result.unwrap_err().is_not_found());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryCustomerRepository::new();
        let other = repo.clone();
        let customer = Customer::new("Percy").unwrap();

        other.add(customer.clone()).await.unwrap();

        assert!(repo.get(customer.id()).await.is_ok());
    }

    #[tokio::test]
    async fn concurrent_adds_are_all_kept() {
        let repo = InMemoryCustomerRepository::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let customer = Customer::new(format!("Guest {i}")).unwrap();
                repo.add(customer.clone()).await.unwrap();
                repo.get(customer.id()).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.len().await, 32);
    }

    #[tokio::test]
    async fn product_lifecycle() {
        let repo = InMemoryProductRepository::new();
        let product = beer();
        let id = product.id();

        repo.add(product.clone()).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), product);

        let cheaper = Product::restore(product.item().clone(), Money::from_cents(149), 2);
        repo.update(cheaper).await.unwrap();
        let stored = repo.get(id).await.unwrap();
        assert_eq!(stored.price(), Money::from_cents(149));
        assert_eq!(stored.quantity(), 2);

        repo.delete(id).await.unwrap();
        assert!(repo.get(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn product_duplicate_add_fails() {
        let repo = InMemoryProductRepository::new();
        let product = beer();

        repo.add(product.clone()).await.unwrap();
        let result = repo.add(product).await;

        assert!(result.unwrap_err().is_already_exists());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn product_update_and_delete_missing_are_not_found() {
        let repo = InMemoryProductRepository::new();

        assert!(repo.update(beer()).await.unwrap_err().is_not_found());
        assert!(repo.delete(ProductId::new()).await.unwrap_err().is_not_found());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn get_all_returns_every_product() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.get_all().await.unwrap().is_empty());

        let peanuts = Product::new("Peanuts", "A delicious snack", Money::from_cents(99)).unwrap();
        repo.add_all(vec![beer(), peanuts]).await.unwrap();

        let mut names: Vec<_> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.item().name.clone())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Beer", "Peanuts"]);
    }

    #[tokio::test]
    async fn add_all_stops_at_first_failure() {
        let repo = InMemoryProductRepository::new();
        let product = beer();
        let wine = Product::new("Wine", "A fine wine", Money::from_cents(599)).unwrap();

        let result = repo
            .add_all(vec![product.clone(), product, wine.clone()])
            .await;

        assert!(result.unwrap_err().is_already_exists());
        assert_eq!(repo.len().await, 1);
        assert!(repo.get(wine.id()).await.is_err());
    }
}
