//! Identifier and money types shared by every crate in the tavern workspace.

mod money;
mod types;

pub use money::Money;
pub use types::{CustomerId, ProductId};
