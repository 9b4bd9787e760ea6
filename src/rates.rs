//! Interest rate table
//!
//! Loaded once when the ledger is built and never changed afterwards. Products copy the rate
//! they were opened with, so a ledger built from another table does not affect existing records.
//!
//! ```json
//! {
//!   "savings": "0.04",
//!   "current": "0.01",
//!   "loan": { "personal": "0.12", "home": "0.08", "vehicle": "0.10" },
//!   "fd": { "6_months": "0.055", "1_year": "0.065", "2_years": "0.070" }
//! }
//! ```
//!
//! A loan type or term missing from the table can't be opened.

use crate::{
    account::AccountType,
    products::{FdTerm, LoanKind},
};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, io::Read};

/// Yearly interest rates as fractions, `0.04` is 4%
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RateTable {
    pub savings: Decimal,
    pub current: Decimal,
    pub loan: BTreeMap<LoanKind, Decimal>,
    pub fd: BTreeMap<FdTerm, Decimal>,
}

impl RateTable {
    /// Read table from json
    pub fn from_json(reader: impl Read) -> anyhow::Result<Self> {
        serde_json::from_reader(reader).context("malformed interest rate table")
    }

    /// rate paid on account balance
    pub fn account_rate(&self, account_type: AccountType) -> Decimal {
        match account_type {
            AccountType::Savings => self.savings,
            AccountType::Current => self.current,
        }
    }

    /// `None` when loans of this kind are not offered
    pub fn loan_rate(&self, kind: LoanKind) -> Option<Decimal> {
        self.loan.get(&kind).copied()
    }

    /// `None` when deposits for this term are not offered
    pub fn fd_rate(&self, term: FdTerm) -> Option<Decimal> {
        self.fd.get(&term).copied()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            savings: Decimal::new(4, 2),
            current: Decimal::new(1, 2),
            loan: BTreeMap::from([
                (LoanKind::Personal, Decimal::new(12, 2)),
                (LoanKind::Home, Decimal::new(8, 2)),
                (LoanKind::Vehicle, Decimal::new(10, 2)),
            ]),
            fd: BTreeMap::from([
                (FdTerm::SixMonths, Decimal::new(55, 3)),
                (FdTerm::OneYear, Decimal::new(65, 3)),
                (FdTerm::TwoYears, Decimal::new(70, 3)),
            ]),
        }
    }
}
