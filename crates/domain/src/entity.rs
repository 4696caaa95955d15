//! Entity primitives. They carry identity but no behavior of their own;
//! the owning aggregate enforces every rule.

use serde::{Deserialize, Serialize};

use crate::{CustomerId, ProductId};

/// A person, the root entity of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: CustomerId,
    pub name: String,
    pub age: Option<u32>,
}

/// Something the tavern sells, the root entity of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ProductId,
    pub name: String,
    pub description: String,
}
