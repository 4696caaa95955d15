//! Persistence for the tavern aggregates.
//!
//! Every backend implements [`CustomerRepository`] and [`ProductRepository`],
//! so services can hold either one behind a trait object.

pub mod error;
pub mod memory;
pub mod mongo;
pub mod store;

pub use common::{CustomerId, ProductId};
pub use error::{RepositoryError, Result};
pub use memory::{InMemoryCustomerRepository, InMemoryProductRepository};
pub use mongo::{
    CustomerRecord, MongoConfig, MongoCustomerRepository, MongoProductRepository, MongoStore,
    ProductRecord,
};
pub use store::{CustomerRepository, ProductRepository, ProductRepositoryExt};
