//! Customer aggregate implementation.

use crate::entity::{Item, Person};
use crate::transaction::Transaction;
use crate::CustomerId;

use super::CustomerError;

/// Customer aggregate root.
///
/// The embedded [`Person`] carries the customer's identity and name. Items
/// and transactions are kept in the order they were recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    person: Person,
    products: Vec<Item>,
    transactions: Vec<Transaction>,
}

impl Customer {
    /// Creates a customer with a freshly generated identifier.
    ///
    /// Fails with [`CustomerError::InvalidPerson`] when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, CustomerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CustomerError::InvalidPerson);
        }

        Ok(Self::restore(CustomerId::new(), name))
    }

    /// Rebuilds a customer from persisted data.
    ///
    /// Storage adapters only: no validation is performed.
    pub fn restore(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            person: Person {
                id,
                name: name.into(),
                age: None,
            },
            products: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.person.id
    }

    /// Overwrites the identifier. Storage adapters only.
    pub fn set_id(&mut self, id: CustomerId) {
        self.person.id = id;
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    /// Renames the customer.
    ///
    /// An empty name is rejected and the current name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CustomerError::InvalidPerson);
        }
        self.person.name = name;
        Ok(())
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Items the customer has bought, oldest first.
    pub fn purchased_items(&self) -> &[Item] {
        &self.products
    }

    pub fn add_purchased_item(&mut self, item: Item) {
        self.products.push(item);
    }

    /// Money movements, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn record_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, ProductId};

    #[test]
    fn test_new_customer_requires_name() {
        let result = Customer::new("");
        assert_eq!(result, Err(CustomerError::InvalidPerson));
    }

    #[test]
    fn test_new_customer_starts_empty() {
        let customer = Customer::new("Percy").unwrap();

        assert_eq!(customer.name(), "Percy");
        assert!(!customer.id().is_nil());
        assert!(customer.transactions().is_empty());
        assert!(customer.purchased_items().is_empty());
    }

    #[test]
    fn test_new_customers_get_distinct_ids() {
        let a = Customer::new("John Doe").unwrap();
        let b = Customer::new("John Doe").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_set_name_assigns_value() {
        let mut customer = Customer::new("Original Name").unwrap();
        customer.set_name("Updated Name").unwrap();
        assert_eq!(customer.name(), "Updated Name");
        assert_eq!(customer.person().name, "Updated Name");
    }

    #[test]
    fn test_set_name_rejects_empty_and_keeps_current() {
        let mut customer = Customer::new("Original Name").unwrap();
        let result = customer.set_name("");
        assert_eq!(result, Err(CustomerError::InvalidPerson));
        assert_eq!(customer.name(), "Original Name");
    }

    #[test]
    fn test_set_id_rehydrates_identity() {
        let mut customer = Customer::new("Percy").unwrap();
        let stored = CustomerId::new();
        customer.set_id(stored);
        assert_eq!(customer.id(), stored);
    }

    #[test]
    fn test_restore_skips_validation() {
        let id = CustomerId::new();
        let customer = Customer::restore(id, "");
        assert_eq!(customer.id(), id);
        assert_eq!(customer.name(), "");
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let mut customer = Customer::new("Percy").unwrap();
        let tavern = uuid::Uuid::new_v4();

        customer.record_transaction(Transaction::new(
            customer.id().as_uuid(),
            tavern,
            Money::from_cents(199),
        ));
        customer.record_transaction(Transaction::new(
            customer.id().as_uuid(),
            tavern,
            Money::from_cents(99),
        ));
        customer.add_purchased_item(Item {
            id: ProductId::new(),
            name: "Beer".to_string(),
            description: "A refreshing beer".to_string(),
        });

        let amounts: Vec<_> = customer.transactions().iter().map(|t| t.amount()).collect();
        assert_eq!(amounts, vec![Money::from_cents(199), Money::from_cents(99)]);
        assert_eq!(customer.purchased_items()[0].name, "Beer");
    }
}
