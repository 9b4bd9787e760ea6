//! Account traits and structs
use crate::{errors::LedgerErr, AccountNumber, FixedDepositId, LoanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub(crate) mod balance;
pub(crate) mod customer_account;
pub(crate) mod pin;
pub(crate) mod transactions;

pub use customer_account::{AccountApplication, CustomerAcc};
pub use pin::Pin;
pub use transactions::{Notification, Transaction, TransactionKind};

/// Represent basic account information and balance
pub trait Account {
    /// generated account number
    fn account_number(&self) -> &AccountNumber;
    /// name of the primary holder
    fn holder(&self) -> &str;
    /// savings or current
    fn account_type(&self) -> AccountType;
    /// current balance
    fn balance(&self) -> Decimal;
    /// fixed deposits opened against this account, oldest first
    fn fixed_deposits(&self) -> &[FixedDepositId];
    /// loans applied for from this account, oldest first
    fn loans(&self) -> &[LoanId];
}

/// Kind of account, decides which interest rate applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    /// lowercase name used in scripts and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Current => "current",
        }
    }
}

impl FromStr for AccountType {
    type Err = LedgerErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            _ => Err(LedgerErr::InvalidAccountType),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
