//! Possible errors

use crate::amount::NegativeAmountErr;
use thiserror::Error;

/// Group all validation failures the ledger can report.
///
/// A returned error always means nothing in the ledger was changed.
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerErr {
    #[error("account number does not exist")]
    AccountNotFound,
    #[error("invalid PIN")]
    InvalidPin,
    #[error("invalid account type, choose 'savings' or 'current'")]
    InvalidAccountType,
    #[error("PIN must be exactly 4 numeric digits")]
    InvalidPinFormat,
    #[error("invalid FD duration")]
    InvalidFdDuration,
    #[error("invalid loan type")]
    InvalidLoanType,
    #[error("invalid loan ID")]
    InvalidLoanId,
    #[error("loan is already fully repaid")]
    LoanFullyRepaid,
    #[error("username already exists")]
    UsernameTaken,
    #[error("initial deposit cannot be negative")]
    NegativeDeposit(#[from] NegativeAmountErr),
}

/// Group errors that stop a single script operation from reaching the ledger,
/// or that the ledger itself returned
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptErr {
    /// Row lacks a column required by its operation
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    /// Operation needs a logged in user
    #[error("login required")]
    LoginRequired,
    /// Credentials did not match any user
    #[error("invalid username or password")]
    InvalidLogin,
    /// Rejected by the ledger
    #[error(transparent)]
    Ledger(#[from] LedgerErr),
}
