//! Represents transactions and notifications kept in account history
use crate::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// increase balance
    Credit,
    /// decrease balance
    Debit,
}

/// Single entry of account transaction history. Never changed once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Amount,
    description: String,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Amount, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    #[allow(missing_docs)]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    #[allow(missing_docs)]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// when it was recorded
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Message left on an account after a state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    message: String,
    timestamp: DateTime<Utc>,
}

impl Notification {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    #[allow(missing_docs)]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// when it was sent
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
