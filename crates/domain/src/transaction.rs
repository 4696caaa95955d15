//! Money movement recorded against a customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// A transfer of money between two accounts.
///
/// Transactions have no identity: two with the same accounts, amount and
/// timestamp are the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    from: Uuid,
    to: Uuid,
    amount: Money,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Records a transfer happening now.
    pub fn new(from: Uuid, to: Uuid, amount: Money) -> Self {
        Self::at(from, to, amount, Utc::now())
    }

    /// Records a transfer at a given instant.
    pub fn at(from: Uuid, to: Uuid, amount: Money, created_at: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            amount,
            created_at,
        }
    }

    pub fn from(&self) -> Uuid {
        self.from
    }

    pub fn to(&self) -> Uuid {
        self.to
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
