//! Product aggregate implementation.

use crate::entity::Item;
use crate::{Money, ProductId};

use super::ProductError;

/// Product aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    item: Item,
    price: Money,
    quantity: u32,
}

impl Product {
    /// Creates a product with a freshly generated identifier and a quantity of 1.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        let description = description.into();

        if name.is_empty() || description.is_empty() {
            return Err(ProductError::MissingValue);
        }
        if price.is_negative() {
            return Err(ProductError::NegativePrice { price });
        }

        Ok(Self {
            item: Item {
                id: ProductId::new(),
                name,
                description,
            },
            price,
            quantity: 1,
        })
    }

    /// Rebuilds a product from persisted data without validation.
    pub fn restore(item: Item, price: Money, quantity: u32) -> Self {
        Self {
            item,
            price,
            quantity,
        }
    }

    pub fn id(&self) -> ProductId {
        self.item.id
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults_quantity_to_one() {
        let product = Product::new("Beer", "A refreshing beer", Money::from_cents(199)).unwrap();

        assert_eq!(product.quantity(), 1);
        assert_eq!(product.price(), Money::from_cents(199));
        assert_eq!(product.item().name, "Beer");
        assert_eq!(product.item().description, "A refreshing beer");
        assert_eq!(product.item().id, product.id());
    }

    #[test]
    fn test_missing_name_or_description_fails() {
        let cases = [("", "A refreshing beer"), ("Beer", ""), ("", "")];
        for (name, description) in cases {
            let result = Product::new(name, description, Money::from_cents(199));
            assert_eq!(result, Err(ProductError::MissingValue), "{name:?}/{description:?}");
        }
    }

    #[test]
    fn test_negative_price_fails() {
        let result = Product::new("Beer", "A refreshing beer", Money::from_cents(-1));
        assert!(matches!(result, Err(ProductError::NegativePrice { .. })));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let product = Product::new("Water", "Tap water", Money::zero()).unwrap();
        assert!(product.price().is_zero());
    }

    #[test]
    fn test_new_products_get_distinct_ids() {
        let a = Product::new("Wine", "A fine wine", Money::from_cents(599)).unwrap();
        let b = Product::new("Wine", "A fine wine", Money::from_cents(599)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_restore_keeps_stored_values() {
        let item = Item {
            id: ProductId::new(),
            name: "Peanuts".to_string(),
            description: "A delicious snack".to_string(),
        };
        let product = Product::restore(item.clone(), Money::from_cents(99), 3);

        assert_eq!(product.item(), &item);
        assert_eq!(product.quantity(), 3);
        assert_eq!(product.price(), Money::from_cents(99));
    }
}
