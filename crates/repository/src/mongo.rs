use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use domain::{Customer, Item, Money, Product};
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use crate::{
    CustomerId, ProductId, RepositoryError, Result,
    store::{CustomerRepository, ProductRepository},
};

const DUPLICATE_KEY: i32 = 11000;

/// Connection settings for the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Upper bound for every single call to the server.
    pub timeout: Duration,
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "tavern".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Shared handle to a MongoDB database.
///
/// Connect once and pass clones to each repository; the driver pools
/// connections internally.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
    timeout: Duration,
}

impl MongoStore {
    /// Opens a client and pings the database.
    #[tracing::instrument(skip(config), fields(database = %config.database))]
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let operation = "connect".to_string();
        let client = match tokio::time::timeout(config.timeout, Client::with_uri_str(&config.uri))
            .await
        {
            Ok(result) => result.map_err(|e| store_error(&operation, e))?,
            Err(_) => {
                return Err(RepositoryError::Timeout {
                    operation,
                    timeout: config.timeout,
                });
            }
        };

        let store = Self {
            database: client.database(&config.database),
            timeout: config.timeout,
        };

        store
            .bounded("ping", store.database.run_command(doc! { "ping": 1 }))
            .await?
            .map_err(|e| store_error("ping", e))?;

        tracing::info!("connected to MongoDB");
        Ok(store)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs one driver call under the configured timeout.
    ///
    /// Only expiry is mapped here; driver errors are returned untouched so
    /// callers can inspect them.
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<mongodb::error::Result<T>>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RepositoryError::Timeout {
                operation: operation.to_string(),
                timeout: self.timeout,
            })
    }

    /// Like [`Self::bounded`], mapping driver errors as well.
    async fn call<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        self.bounded(operation, call)
            .await?
            .map_err(|e| store_error(operation, e))
    }
}

fn store_error(operation: &str, source: mongodb::error::Error) -> RepositoryError {
    let decode_failure = match source.kind.as_ref() {
        ErrorKind::BsonDeserialization(e) => Some(e.to_string()),
        ErrorKind::BsonSerialization(e) => Some(e.to_string()),
        _ => None,
    };

    match decode_failure {
        Some(message) => RepositoryError::Internal {
            operation: operation.to_string(),
            message,
        },
        None => RepositoryError::StoreUnavailable {
            operation: operation.to_string(),
            source,
        },
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

fn by_id(id: impl ToString) -> Document {
    doc! { "_id": id.to_string() }
}

fn parse_id<T: std::str::FromStr>(operation: &str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| RepositoryError::Internal {
        operation: operation.to_string(),
        message: format!("stored id {raw:?} is not a UUID"),
    })
}

/// Flat stored form of a customer.
///
/// Only identity and name are persisted; purchased items and transactions
/// are not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
        }
    }
}

impl CustomerRecord {
    pub fn into_aggregate(self) -> Result<Customer> {
        let id: CustomerId = parse_id("decode customer", &self.id)?;
        Ok(Customer::restore(id, self.name))
    }
}

/// Flat stored form of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity: i64,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.item().name.clone(),
            description: product.item().description.clone(),
            price_cents: product.price().cents(),
            quantity: i64::from(product.quantity()),
        }
    }
}

impl ProductRecord {
    pub fn into_aggregate(self) -> Result<Product> {
        let id: ProductId = parse_id("decode product", &self.id)?;
        let quantity = u32::try_from(self.quantity).map_err(|_| RepositoryError::Internal {
            operation: "decode product".to_string(),
            message: format!("stored quantity {} is out of range", self.quantity),
        })?;

        Ok(Product::restore(
            Item {
                id,
                name: self.name,
                description: self.description,
            },
            Money::from_cents(self.price_cents),
            quantity,
        ))
    }
}

/// MongoDB-backed customer repository (collection `customers`).
#[derive(Clone)]
pub struct MongoCustomerRepository {
    store: MongoStore,
    customers: Collection<CustomerRecord>,
}

impl MongoCustomerRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            store: store.clone(),
            customers: store.database().collection("customers"),
        }
    }

    pub fn collection(&self) -> &Collection<CustomerRecord> {
        &self.customers
    }

    /// Removes a customer. Deleting an absent id is not an error.
    pub async fn delete(&self, id: CustomerId) -> Result<()> {
        let operation = format!("delete customer {id}");
        let result = self
            .store
            .call(&operation, self.customers.delete_one(by_id(id)))
            .await?;
        tracing::debug!(customer_id = %id, deleted = result.deleted_count, "customer delete");
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn get(&self, id: CustomerId) -> Result<Customer> {
        let operation = format!("get customer {id}");
        self.store
            .call(&operation, self.customers.find_one(by_id(id)))
            .await?
            .ok_or_else(|| RepositoryError::not_found("Customer", id))?
            .into_aggregate()
    }

    async fn add(&self, customer: Customer) -> Result<()> {
        let id = customer.id();
        let operation = format!("add customer {id}");
        let record = CustomerRecord::from(&customer);

        match self
            .store
            .bounded(&operation, self.customers.insert_one(&record))
            .await?
        {
            Ok(_) => {
                tracing::debug!(customer_id = %id, "customer inserted");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(RepositoryError::already_exists("Customer", id)),
            Err(e) => Err(store_error(&operation, e)),
        }
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        let id = customer.id();
        self.get(id).await?;

        let operation = format!("update customer {id}");
        let record = CustomerRecord::from(&customer);
        self.store
            .call(
                &operation,
                self.customers
                    .update_one(by_id(id), doc! { "$set": { "name": record.name } }),
            )
            .await?;
        Ok(())
    }
}

/// MongoDB-backed product repository (collection `products`).
#[derive(Clone)]
pub struct MongoProductRepository {
    store: MongoStore,
    products: Collection<ProductRecord>,
}

impl MongoProductRepository {
    pub fn new(store: &MongoStore) -> Self {
        Self {
            store: store.clone(),
            products: store.database().collection("products"),
        }
    }

    pub fn collection(&self) -> &Collection<ProductRecord> {
        &self.products
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        let operation = "get all products";
        let cursor = self.store.call(operation, self.products.find(doc! {})).await?;
        let records: Vec<ProductRecord> = self
            .store
            .call(operation, cursor.try_collect::<Vec<_>>())
            .await?;

        records
            .into_iter()
            .map(ProductRecord::into_aggregate)
            .collect()
    }

    async fn get(&self, id: ProductId) -> Result<Product> {
        let operation = format!("get product {id}");
        self.store
            .call(&operation, self.products.find_one(by_id(id)))
            .await?
            .ok_or_else(|| RepositoryError::not_found("Product", id))?
            .into_aggregate()
    }

    async fn add(&self, product: Product) -> Result<()> {
        let id = product.id();
        let operation = format!("add product {id}");
        let record = ProductRecord::from(&product);

        match self
            .store
            .bounded(&operation, self.products.insert_one(&record))
            .await?
        {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(RepositoryError::already_exists("Product", id)),
            Err(e) => Err(store_error(&operation, e)),
        }
    }

    async fn update(&self, product: Product) -> Result<()> {
        let id = product.id();
        self.get(id).await?;

        let operation = format!("update product {id}");
        let record = ProductRecord::from(&product);
        let update = doc! {
            "$set": {
                "name": record.name,
                "description": record.description,
                "price_cents": record.price_cents,
                "quantity": record.quantity,
            }
        };
        self.store
            .call(&operation, self.products.update_one(by_id(id), update))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<()> {
        let operation = format!("delete product {id}");
        self.store
            .call(&operation, self.products.delete_one(by_id(id)))
            .await?;
        Ok(())
    }
}
