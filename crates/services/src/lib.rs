//! Application services of the tavern.
//!
//! - [`OrderService`] registers customers and totals orders against the
//!   customer and product repositories
//! - [`Tavern`] is the front desk: it places orders and reports the bill

pub mod error;
pub mod order;
pub mod tavern;

pub use error::{ServiceError, TavernError};
pub use order::{OrderService, OrderServiceBuilder};
pub use tavern::{Tavern, TavernBuilder};
