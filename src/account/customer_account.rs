use super::balance::Balance;
use super::transactions::*;
use super::{Account, AccountType, Pin};
use crate::{amount::Amount, errors::LedgerErr, AccountNumber, FixedDepositId, LoanId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Everything a customer fills in to open an account.
///
/// `account_type` and `pin` are kept as typed by the customer, the ledger validates them.
#[derive(Debug, Clone)]
pub struct AccountApplication {
    pub(crate) primary_holder: String,
    pub(crate) age: u32,
    pub(crate) address: String,
    pub(crate) account_type: String,
    pub(crate) pin: String,
    pub(crate) initial_deposit: Decimal,
    pub(crate) joint_holder: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) mobile: Option<String>,
}

impl AccountApplication {
    /// Application with no initial deposit and no optional details
    pub fn new(
        primary_holder: impl Into<String>,
        age: u32,
        address: impl Into<String>,
        account_type: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Self {
            primary_holder: primary_holder.into(),
            age,
            address: address.into(),
            account_type: account_type.into(),
            pin: pin.into(),
            initial_deposit: Decimal::ZERO,
            joint_holder: None,
            email: None,
            mobile: None,
        }
    }

    #[allow(missing_docs)]
    pub fn initial_deposit(mut self, amount: Decimal) -> Self {
        self.initial_deposit = amount;
        self
    }

    #[allow(missing_docs)]
    pub fn joint_holder(mut self, name: impl Into<String>) -> Self {
        self.joint_holder = Some(name.into());
        self
    }

    #[allow(missing_docs)]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[allow(missing_docs)]
    pub fn mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }
}

/// Customer account record with its transaction and notification history
#[derive(Debug, Clone)]
pub struct CustomerAcc {
    number: AccountNumber,
    primary_holder: String,
    joint_holder: Option<String>,
    age: u32,
    address: String,
    account_type: AccountType,
    pin: Pin,
    balance: Balance,
    transactions: Vec<Transaction>,
    notifications: Vec<Notification>,
    created_at: DateTime<Utc>,
    email: Option<String>,
    mobile: Option<String>,
    fixed_deposits: Vec<FixedDepositId>,
    loans: Vec<LoanId>,
}

impl CustomerAcc {
    /// Create empty account from an already validated application
    pub(crate) fn open(
        number: AccountNumber,
        application: AccountApplication,
        account_type: AccountType,
        pin: Pin,
    ) -> Self {
        Self {
            number,
            primary_holder: application.primary_holder,
            joint_holder: application.joint_holder,
            age: application.age,
            address: application.address,
            account_type,
            pin,
            balance: Default::default(),
            transactions: Vec::new(),
            notifications: Vec::new(),
            created_at: Utc::now(),
            email: application.email,
            mobile: application.mobile,
            fixed_deposits: Vec::new(),
            loans: Vec::new(),
        }
    }

    #[cfg(test)]
    /// Savings account `ACC000001` with PIN `1234` and balance 750
    pub fn new_test_account() -> Self {
        let application = AccountApplication::new("Jane", 30, "1 Main St", "savings", "1234");
        let mut a = CustomerAcc::open(
            AccountNumber::nth(1),
            application,
            AccountType::Savings,
            "1234".parse().unwrap(),
        );
        a.record_transaction(TransactionKind::Credit, Amount::new(1000, 0), "Initial deposit");
        a.record_transaction(TransactionKind::Debit, Amount::new(250, 0), "Card payment");
        assert_eq!(a.balance(), Decimal::new(750, 0));
        a
    }

    /// Append transaction and move the balance with it
    pub(crate) fn record_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Amount,
        description: impl Into<String>,
    ) {
        self.balance.apply(kind, &amount);
        self.transactions
            .push(Transaction::new(kind, amount, description));
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::new(message));
    }

    pub(crate) fn check_pin(&self, supplied: &str) -> Result<(), LedgerErr> {
        if self.pin.matches(supplied) {
            Ok(())
        } else {
            Err(LedgerErr::InvalidPin)
        }
    }

    pub(crate) fn link_fixed_deposit(&mut self, id: FixedDepositId) {
        self.fixed_deposits.push(id);
    }

    pub(crate) fn link_loan(&mut self, id: LoanId) {
        self.loans.push(id);
    }
}

impl CustomerAcc {
    #[allow(missing_docs)]
    pub fn joint_holder(&self) -> Option<&str> {
        self.joint_holder.as_deref()
    }

    #[allow(missing_docs)]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[allow(missing_docs)]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[allow(missing_docs)]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[allow(missing_docs)]
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    #[allow(missing_docs)]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// transaction history, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// notification history, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl Account for CustomerAcc {
    fn account_number(&self) -> &AccountNumber {
        &self.number
    }

    fn holder(&self) -> &str {
        &self.primary_holder
    }

    fn account_type(&self) -> AccountType {
        self.account_type
    }

    fn balance(&self) -> Decimal {
        self.balance.current()
    }

    fn fixed_deposits(&self) -> &[FixedDepositId] {
        &self.fixed_deposits
    }

    fn loans(&self) -> &[LoanId] {
        &self.loans
    }
}

#[cfg(test)]
mod test {
    use super::{Account, CustomerAcc, TransactionKind};
    use crate::{amount::Amount, errors::LedgerErr};
    use rust_decimal::Decimal;

    fn ledger_sum(a: &CustomerAcc) -> Decimal {
        a.transactions()
            .iter()
            .map(|t| match t.kind() {
                TransactionKind::Credit => *t.amount(),
                TransactionKind::Debit => -*t.amount(),
            })
            .sum()
    }

    #[test]
    fn balance_follows_transaction_log() {
        let mut a = CustomerAcc::new_test_account();
        a.record_transaction(TransactionKind::Credit, Amount::new(1005, 1), "Transfer in");

        assert_eq!(a.transactions().len(), 3);
        assert_eq!(a.balance(), Decimal::new(8505, 1));
        assert_eq!(a.balance(), ledger_sum(&a));
    }

    #[test]
    fn debit_is_not_limited_by_balance() {
        let mut a = CustomerAcc::new_test_account();
        a.record_transaction(TransactionKind::Debit, Amount::new(1000, 0), "Big payment");

        assert_eq!(a.balance(), Decimal::new(-250, 0));
        assert_eq!(a.balance(), ledger_sum(&a));
    }

    #[test]
    fn zero_credit_is_still_recorded() {
        let mut a = CustomerAcc::new_test_account();
        a.record_transaction(TransactionKind::Credit, Amount::default(), "Nothing");

        assert_eq!(a.transactions().len(), 3);
        assert_eq!(a.transactions()[2].description(), "Nothing");
        assert_eq!(a.balance(), Decimal::new(750, 0));
    }

    #[test]
    fn pin_check() {
        let a = CustomerAcc::new_test_account();
        assert_eq!(a.check_pin("1234"), Ok(()));
        assert_eq!(a.check_pin("4321"), Err(LedgerErr::InvalidPin));
    }

    #[test]
    fn notifications_keep_order() {
        let mut a = CustomerAcc::new_test_account();
        a.notify("first");
        a.notify("second");

        let messages: Vec<_> = a.notifications().iter().map(|n| n.message()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert!(a.notifications()[0].timestamp() <= a.notifications()[1].timestamp());
    }
}
