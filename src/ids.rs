//! Ledger generated identifiers.
//!
//! Every identifier is a fixed prefix followed by a sequence number zero-padded to six digits.
//! Identifiers are only minted by the ledger, callers refer to them as plain `&str`.

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Identifier of the `seq`-th record, counting from 1
            pub(crate) fn nth(seq: usize) -> Self {
                Self(format!(concat!($prefix, "{:06}"), seq))
            }

            /// identifier text
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

sequential_id!(
    /// Account number, `ACC000001`, `ACC000002`, ...
    AccountNumber,
    "ACC"
);
sequential_id!(
    /// Fixed deposit identifier, `FD000001`, ...
    FixedDepositId,
    "FD"
);
sequential_id!(
    /// Loan identifier, `LOAN000001`, ...
    LoanId,
    "LOAN"
);

#[cfg(test)]
mod test {
    use super::{AccountNumber, FixedDepositId, LoanId};

    #[test]
    fn zero_padded_with_prefix() {
        assert_eq!(AccountNumber::nth(1).as_str(), "ACC000001");
        assert_eq!(FixedDepositId::nth(42).as_str(), "FD000042");
        assert_eq!(LoanId::nth(123456).to_string(), "LOAN123456");
    }

    #[test]
    fn sequence_order_is_preserved() {
        assert!(AccountNumber::nth(9) < AccountNumber::nth(10));
        assert!(LoanId::nth(99) < LoanId::nth(100));
    }
}
