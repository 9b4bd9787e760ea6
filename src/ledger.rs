//! The ledger: every account, product and user credential of one bank session.
//!
//! Each operation validates first and only then mutates, so a returned error means the
//! ledger is exactly as it was before the call. Validation order is part of the contract:
//! account lookup, then PIN, then the operation specific checks.

use crate::{
    account::{Account, AccountApplication, AccountType, CustomerAcc, Notification, Pin, TransactionKind},
    amount::Amount,
    credentials::UserStore,
    errors::LedgerErr,
    products::{FdTerm, FixedDeposit, Loan, LoanKind},
    rates::RateTable,
    AccountNumber, FixedDepositId, LoanId,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::info;

type Accounts = BTreeMap<AccountNumber, CustomerAcc>;

/// In-memory bank ledger
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: Accounts,
    fixed_deposits: BTreeMap<FixedDepositId, FixedDeposit>,
    loans: BTreeMap<LoanId, Loan>,
    users: UserStore,
    rates: RateTable,
}

impl Ledger {
    /// Empty ledger using `rates` for every product it opens
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates,
            ..Default::default()
        }
    }

    /// Open a new account and credit the initial deposit.
    ///
    /// Checks, in order: deposit is not negative, account type is `savings` or `current`,
    /// PIN is exactly four digits. The deposit is always recorded as a credit transaction,
    /// even when it is zero.
    pub fn create_account(
        &mut self,
        application: AccountApplication,
    ) -> Result<AccountNumber, LedgerErr> {
        let deposit = Amount::try_from(application.initial_deposit)?;
        let account_type: AccountType = application.account_type.parse()?;
        let pin: Pin = application.pin.parse()?;

        let number = AccountNumber::nth(self.accounts.len() + 1);
        let mut account = CustomerAcc::open(number.clone(), application, account_type, pin);
        account.record_transaction(TransactionKind::Credit, deposit, "Initial deposit");
        account.notify("Account created successfully");

        info!(account = %number, %account_type, deposit = %deposit, "account opened");
        self.accounts.insert(number.clone(), account);
        Ok(number)
    }

    /// Current balance of the account
    pub fn get_balance(&self, account_number: &str, pin: &str) -> Result<Decimal, LedgerErr> {
        unlock(&self.accounts, account_number, pin).map(|acc| acc.balance())
    }

    /// Whole notification history of the account, oldest first
    pub fn get_notifications(
        &self,
        account_number: &str,
        pin: &str,
    ) -> Result<&[Notification], LedgerErr> {
        unlock(&self.accounts, account_number, pin).map(|acc| acc.notifications())
    }

    /// Open a fixed deposit at the current rate for `duration`.
    ///
    /// The account balance is left untouched.
    pub fn create_fixed_deposit(
        &mut self,
        account_number: &str,
        amount: Decimal,
        duration: &str,
        pin: &str,
    ) -> Result<FixedDepositId, LedgerErr> {
        let account = unlock_mut(&mut self.accounts, account_number, pin)?;
        let term: FdTerm = duration.parse()?;
        let rate = self
            .rates
            .fd_rate(term)
            .ok_or(LedgerErr::InvalidFdDuration)?;

        let id = FixedDepositId::nth(self.fixed_deposits.len() + 1);
        let deposit = FixedDeposit {
            id: id.clone(),
            account: account.account_number().clone(),
            amount,
            term,
            rate,
            started_at: Utc::now(),
        };
        account.link_fixed_deposit(id.clone());
        account.notify(format!("Fixed deposit {id} created successfully"));

        info!(account = %deposit.account, deposit = %id, %term, %amount, "fixed deposit created");
        self.fixed_deposits.insert(id.clone(), deposit);
        Ok(id)
    }

    /// Register a loan at the current rate for `loan_type`.
    ///
    /// The loan amount is not credited to the account.
    pub fn apply_for_loan(
        &mut self,
        account_number: &str,
        loan_type: &str,
        amount: Decimal,
        duration_months: u32,
        pin: &str,
    ) -> Result<LoanId, LedgerErr> {
        let account = unlock_mut(&mut self.accounts, account_number, pin)?;
        let kind: LoanKind = loan_type.parse()?;
        let rate = self.rates.loan_rate(kind).ok_or(LedgerErr::InvalidLoanType)?;

        let id = LoanId::nth(self.loans.len() + 1);
        let loan = Loan::new(
            id.clone(),
            account.account_number().clone(),
            kind,
            amount,
            duration_months,
            rate,
        );
        account.link_loan(id.clone());
        account.notify(format!("Loan {id} applied successfully"));

        info!(account = %loan.account, loan = %id, %kind, %amount, duration_months, "loan applied");
        self.loans.insert(id.clone(), loan);
        Ok(id)
    }

    /// Count one installment of `loan_id`, returns how many are paid now.
    ///
    /// Any account may pay any loan, the notification goes to the paying account.
    /// Nothing is debited from the account.
    pub fn pay_loan_emi(
        &mut self,
        loan_id: &str,
        account_number: &str,
        pin: &str,
    ) -> Result<u32, LedgerErr> {
        let account = unlock_mut(&mut self.accounts, account_number, pin)?;
        let loan = self.loans.get_mut(loan_id).ok_or(LedgerErr::InvalidLoanId)?;
        let paid = loan.record_emi()?;

        account.notify(format!("EMI paid for loan {}", loan.id));

        info!(account = %account.account_number(), loan = %loan.id, paid, of = loan.duration_months, "emi paid");
        Ok(paid)
    }

    /// Register a new user
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<(), LedgerErr> {
        self.users.create(username, password)?;
        info!(%username, "user created");
        Ok(())
    }

    /// `true` iff the user exists and the password matches
    pub fn validate_user(&self, username: &str, password: &str) -> bool {
        self.users.validate(username, password)
    }
}

impl Ledger {
    /// rate table the ledger was built with
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    #[allow(missing_docs)]
    pub fn account(&self, account_number: &str) -> Option<&CustomerAcc> {
        self.accounts.get(account_number)
    }

    /// all accounts ordered by account number
    pub fn accounts(&self) -> impl Iterator<Item = &CustomerAcc> {
        self.accounts.values()
    }

    #[allow(missing_docs)]
    pub fn fixed_deposit(&self, id: &str) -> Option<&FixedDeposit> {
        self.fixed_deposits.get(id)
    }

    #[allow(missing_docs)]
    pub fn loan(&self, id: &str) -> Option<&Loan> {
        self.loans.get(id)
    }

    /// fixed deposits opened from `account_number`, oldest first
    pub fn fixed_deposits_of<'a>(
        &'a self,
        account_number: &str,
    ) -> impl Iterator<Item = &'a FixedDeposit> + 'a {
        let ids = self
            .accounts
            .get(account_number)
            .map(|acc| acc.fixed_deposits())
            .unwrap_or_default();
        ids.iter().filter_map(|id| self.fixed_deposits.get(id))
    }

    /// loans applied for from `account_number`, oldest first
    pub fn loans_of<'a>(&'a self, account_number: &str) -> impl Iterator<Item = &'a Loan> + 'a {
        let ids = self
            .accounts
            .get(account_number)
            .map(|acc| acc.loans())
            .unwrap_or_default();
        ids.iter().filter_map(|id| self.loans.get(id))
    }

    /// registered users
    pub fn users(&self) -> &UserStore {
        &self.users
    }
}

fn unlock<'a>(accounts: &'a Accounts, number: &str, pin: &str) -> Result<&'a CustomerAcc, LedgerErr> {
    let account = accounts.get(number).ok_or(LedgerErr::AccountNotFound)?;
    account.check_pin(pin)?;
    Ok(account)
}

fn unlock_mut<'a>(
    accounts: &'a mut Accounts,
    number: &str,
    pin: &str,
) -> Result<&'a mut CustomerAcc, LedgerErr> {
    let account = accounts.get_mut(number).ok_or(LedgerErr::AccountNotFound)?;
    account.check_pin(pin)?;
    Ok(account)
}
