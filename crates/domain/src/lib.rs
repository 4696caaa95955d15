//! Domain layer for the tavern.
//!
//! This crate provides:
//! - Entity primitives (`Person`, `Item`) carrying identity
//! - The `Transaction` value object
//! - The `Customer` and `Product` aggregates with their construction invariants

pub mod customer;
pub mod entity;
pub mod product;
pub mod transaction;

pub use common::{CustomerId, Money, ProductId};
pub use customer::{Customer, CustomerError};
pub use entity::{Item, Person};
pub use product::{Product, ProductError};
pub use transaction::Transaction;
