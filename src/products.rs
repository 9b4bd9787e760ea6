//! Fixed deposits and loans opened against an account

use crate::{errors::LedgerErr, AccountNumber, FixedDepositId, LoanId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Term of a fixed deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum FdTerm {
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "1_year")]
    OneYear,
    #[serde(rename = "2_years")]
    TwoYears,
}

impl FdTerm {
    /// name used in scripts and rate files
    pub fn as_str(&self) -> &'static str {
        match self {
            FdTerm::SixMonths => "6_months",
            FdTerm::OneYear => "1_year",
            FdTerm::TwoYears => "2_years",
        }
    }
}

impl FromStr for FdTerm {
    type Err = LedgerErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6_months" => Ok(FdTerm::SixMonths),
            "1_year" => Ok(FdTerm::OneYear),
            "2_years" => Ok(FdTerm::TwoYears),
            _ => Err(LedgerErr::InvalidFdDuration),
        }
    }
}

impl fmt::Display for FdTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purpose of a loan, decides its interest rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LoanKind {
    Personal,
    Home,
    Vehicle,
}

impl LoanKind {
    /// name used in scripts and rate files
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanKind::Personal => "personal",
            LoanKind::Home => "home",
            LoanKind::Vehicle => "vehicle",
        }
    }
}

impl FromStr for LoanKind {
    type Err = LedgerErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "personal" => Ok(LoanKind::Personal),
            "home" => Ok(LoanKind::Home),
            "vehicle" => Ok(LoanKind::Vehicle),
            _ => Err(LedgerErr::InvalidLoanType),
        }
    }
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lump sum deposited for a fixed term.
///
/// `rate` is copied from the rate table when the deposit is made and never follows later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct FixedDeposit {
    pub id: FixedDepositId,
    pub account: AccountNumber,
    pub amount: Decimal,
    pub term: FdTerm,
    pub rate: Decimal,
    pub started_at: DateTime<Utc>,
}

/// Loan with a count of installments paid so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct Loan {
    pub id: LoanId,
    pub account: AccountNumber,
    pub kind: LoanKind,
    pub amount: Decimal,
    pub duration_months: u32,
    pub rate: Decimal,
    pub started_at: DateTime<Utc>,
    emis_paid: u32,
}

impl Loan {
    pub(crate) fn new(
        id: LoanId,
        account: AccountNumber,
        kind: LoanKind,
        amount: Decimal,
        duration_months: u32,
        rate: Decimal,
    ) -> Self {
        Self {
            id,
            account,
            kind,
            amount,
            duration_months,
            rate,
            started_at: Utc::now(),
            emis_paid: 0,
        }
    }

    /// installments paid so far
    pub fn emis_paid(&self) -> u32 {
        self.emis_paid
    }

    /// every scheduled installment has been paid
    pub fn is_repaid(&self) -> bool {
        self.emis_paid >= self.duration_months
    }

    /// Count one more installment, returns the new count
    pub(crate) fn record_emi(&mut self) -> Result<u32, LedgerErr> {
        if self.is_repaid() {
            return Err(LedgerErr::LoanFullyRepaid);
        }
        self.emis_paid += 1;
        Ok(self.emis_paid)
    }
}
