use super::transactions::TransactionKind;
use rust_decimal::Decimal;

/// Represents current account balance
#[derive(Debug, Clone, Default)]
pub struct Balance {
    current: Decimal,
}

impl Balance {
    pub fn apply(&mut self, kind: TransactionKind, amount: &Decimal) {
        match kind {
            TransactionKind::Credit => self.credit(amount),
            TransactionKind::Debit => self.debit(amount),
        }
    }

    fn credit(&mut self, amount: &Decimal) {
        self.current += amount;
    }

    // no overdraft check, balance may go below zero
    fn debit(&mut self, amount: &Decimal) {
        self.current -= amount;
    }

    pub fn current(&self) -> Decimal {
        self.current
    }
}
