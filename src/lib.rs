//! In-memory retail banking ledger: accounts, fixed deposits, loans and user credentials.
//!
//! [`ledger::Ledger`] owns all state and is the only place business rules live.
//! [`script`] and [`csv`] drive a ledger from a csv operation script.

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod credentials;
pub mod csv;
pub mod errors;
pub mod ids;
pub mod ledger;
pub mod products;
pub mod rates;
pub mod script;

pub use ids::{AccountNumber, FixedDepositId, LoanId};
pub use ledger::Ledger;
