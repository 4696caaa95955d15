//! Wiring for the tavern binary.
//!
//! Picks the repository backend from [`Config`], stocks the house menu and
//! runs a sample order through the [`Tavern`].

pub mod config;
pub mod error;

use domain::{Money, Product};
use repository::MongoStore;
use services::{OrderService, Tavern};

pub use config::Config;
pub use error::AppError;

/// The products every tavern starts with.
pub fn house_menu() -> Result<Vec<Product>, AppError> {
    Ok(vec![
        Product::new("Beer", "A refreshing beer", Money::from_cents(199))?,
        Product::new("Peanuts", "A delicious snack", Money::from_cents(99))?,
        Product::new("Wine", "A fine wine", Money::from_cents(599))?,
    ])
}

/// Builds an order service on the backend selected by `config`, stocked
/// with `products`.
pub async fn build_order_service(
    config: &Config,
    products: Vec<Product>,
) -> Result<OrderService, AppError> {
    let builder = match config.mongo() {
        Some(mongo) => {
            let store = MongoStore::connect(&mongo).await?;
            tracing::info!(database = %mongo.database, "using MongoDB repositories");
            OrderService::builder()
                .with_mongo_customer_repository(&store)
                .with_mongo_product_repository(&store)
        }
        None => {
            tracing::info!("using in-memory repositories");
            OrderService::builder()
                .with_memory_customer_repository()
                .with_product_repository(repository::InMemoryProductRepository::new())
        }
    };

    Ok(builder.with_products(products).build().await?)
}

/// Registers a guest and orders a beer and peanuts for them.
pub async fn run(config: &Config) -> Result<(), AppError> {
    let menu = house_menu()?;
    let order: Vec<_> = menu.iter().take(2).map(Product::id).collect();

    let service = build_order_service(config, menu).await?;
    let customer_id = service.add_customer("Percy").await?;

    let tavern = Tavern::builder().with_order_service(service).build()?;
    tavern.order(customer_id, &order).await?;
    Ok(())
}
