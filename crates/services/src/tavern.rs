//! The tavern front desk.

use std::sync::Arc;

use domain::{CustomerId, ProductId};

use crate::error::TavernError;
use crate::order::OrderService;

/// Places orders and reports what to bill.
pub struct Tavern {
    orders: Arc<OrderService>,
}

impl Tavern {
    pub fn builder() -> TavernBuilder {
        TavernBuilder::default()
    }

    pub fn order_service(&self) -> &OrderService {
        &self.orders
    }

    /// Orders `product_ids` for a customer and logs the amount to bill.
    ///
    /// Nothing is persisted here.
    #[tracing::instrument(skip(self, product_ids))]
    pub async fn order(
        &self,
        customer_id: CustomerId,
        product_ids: &[ProductId],
    ) -> Result<(), TavernError> {
        let amount = self
            .orders
            .create_order(customer_id, product_ids)
            .await
            .map_err(TavernError::Order)?;

        tracing::info!(%customer_id, %amount, "bill the customer");
        Ok(())
    }
}

#[derive(Default)]
pub struct TavernBuilder {
    orders: Option<Arc<OrderService>>,
}

impl TavernBuilder {
    /// Accepts an owned service or an `Arc` shared with other callers.
    pub fn with_order_service(mut self, service: impl Into<Arc<OrderService>>) -> Self {
        self.orders = Some(service.into());
        self
    }

    pub fn build(self) -> Result<Tavern, TavernError> {
        let orders = self.orders.ok_or(TavernError::MissingOrderService)?;
        Ok(Tavern { orders })
    }
}
