//! Order service and its builder.

use std::sync::Arc;

use domain::{Customer, CustomerId, Money, Product, ProductId};
use repository::{
    CustomerRepository, InMemoryCustomerRepository, InMemoryProductRepository,
    MongoCustomerRepository, MongoProductRepository, MongoStore, ProductRepository,
    ProductRepositoryExt,
};

use crate::error::ServiceError;

/// Registers customers and prices orders.
///
/// The service only sees repository traits, so any backend can be plugged
/// in through [`OrderServiceBuilder`].
pub struct OrderService {
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
}

impl OrderService {
    pub fn builder() -> OrderServiceBuilder {
        OrderServiceBuilder::default()
    }

    pub fn customers(&self) -> &dyn CustomerRepository {
        self.customers.as_ref()
    }

    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }

    /// Totals the prices of `product_ids` for an existing customer.
    ///
    /// Products are fetched in the given order and the first failure is
    /// returned as is; no partial total is ever reported. A total that does
    /// not fit in [`Money`] fails with [`ServiceError::TotalOverflow`].
    /// Nothing is written.
    #[tracing::instrument(skip(self, product_ids), fields(products = product_ids.len()))]
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        product_ids: &[ProductId],
    ) -> Result<Money, ServiceError> {
        let customer = self.customers.get(customer_id).await.map_err(|e| {
            tracing::warn!(error = %e, "error fetching customer");
            metrics::counter!("orders_failed_total").increment(1);
            e
        })?;

        let mut total = Money::zero();
        for (index, &product_id) in product_ids.iter().enumerate() {
            let product = self.products.get(product_id).await.map_err(|e| {
                tracing::warn!(error = %e, %product_id, "error fetching product");
                metrics::counter!("orders_failed_total").increment(1);
                e
            })?;
            total = total.checked_add(product.price()).ok_or_else(|| {
                tracing::warn!(%product_id, "order total overflowed");
                metrics::counter!("orders_failed_total").increment(1);
                ServiceError::TotalOverflow {
                    products: index + 1,
                }
            })?;
        }

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            customer = customer.name(),
            products = product_ids.len(),
            %total,
            "customer is ordering"
        );
        Ok(total)
    }

    /// Creates a customer and stores it. Returns the new customer's id.
    #[tracing::instrument(skip(self))]
    pub async fn add_customer(&self, name: &str) -> Result<CustomerId, ServiceError> {
        let customer = Customer::new(name)?;
        let id = customer.id();
        self.customers.add(customer).await?;

        metrics::counter!("customers_added_total").increment(1);
        Ok(id)
    }
}

/// Step-by-step assembly of an [`OrderService`].
///
/// Later calls for the same repository replace earlier ones. Replacing the
/// product repository also drops products queued for the previous one.
/// [`build`] stops at the first configuration error.
///
/// [`build`]: OrderServiceBuilder::build
#[derive(Default)]
pub struct OrderServiceBuilder {
    customers: Option<Arc<dyn CustomerRepository>>,
    products: Option<Arc<dyn ProductRepository>>,
    seed_products: Vec<Product>,
}

impl OrderServiceBuilder {
    pub fn with_customer_repository(mut self, repo: impl CustomerRepository + 'static) -> Self {
        self.customers = Some(Arc::new(repo));
        self
    }

    pub fn with_memory_customer_repository(self) -> Self {
        self.with_customer_repository(InMemoryCustomerRepository::new())
    }

    pub fn with_mongo_customer_repository(self, store: &MongoStore) -> Self {
        self.with_customer_repository(MongoCustomerRepository::new(store))
    }

    pub fn with_product_repository(mut self, repo: impl ProductRepository + 'static) -> Self {
        self.products = Some(Arc::new(repo));
        self.seed_products.clear();
        self
    }

    /// Uses a fresh in-memory product repository stocked with `products`.
    pub fn with_memory_product_repository(self, products: Vec<Product>) -> Self {
        self.with_product_repository(InMemoryProductRepository::new())
            .with_products(products)
    }

    pub fn with_mongo_product_repository(self, store: &MongoStore) -> Self {
        self.with_product_repository(MongoProductRepository::new(store))
    }

    /// Products to add to the current product repository when the service
    /// is built.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.seed_products.extend(products);
        self
    }

    pub async fn build(self) -> Result<OrderService, ServiceError> {
        let customers = self
            .customers
            .ok_or(ServiceError::MissingRepository("customer"))?;
        let products = self
            .products
            .ok_or(ServiceError::MissingRepository("product"))?;

        if !self.seed_products.is_empty() {
            tracing::debug!(count = self.seed_products.len(), "stocking products");
            products.add_all(self.seed_products).await?;
        }

        Ok(OrderService {
            customers,
            products,
        })
    }
}
