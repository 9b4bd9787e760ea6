//! Account PIN
use crate::errors::LedgerErr;
use std::str::FromStr;

/// Four digit PIN, kept as its integer value so `"0042"` is stored as `42`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin(u16);

impl Pin {
    /// Compare with a PIN typed by the caller.
    ///
    /// Comparison is by integer value; input that is not a number never matches.
    pub fn matches(&self, supplied: &str) -> bool {
        supplied
            .trim()
            .parse::<u32>()
            .map_or(false, |value| value == u32::from(self.0))
    }
}

impl FromStr for Pin {
    type Err = LedgerErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LedgerErr::InvalidPinFormat);
        }
        s.parse().map(Pin).map_err(|_| LedgerErr::InvalidPinFormat)
    }
}

#[cfg(test)]
mod test {
    use super::Pin;
    use crate::errors::LedgerErr;

    #[test]
    fn exactly_four_ascii_digits() {
        assert!("1234".parse::<Pin>().is_ok());
        assert!("0000".parse::<Pin>().is_ok());
        for bad in ["123", "12345", "12a4", "", " 123", "１２３４"] {
            assert_eq!(bad.parse::<Pin>(), Err(LedgerErr::InvalidPinFormat), "{bad:?}");
        }
    }

    #[test]
    fn matches_by_integer_value() {
        let pin: Pin = "0042".parse().unwrap();
        assert!(pin.matches("0042"));
        assert!(pin.matches("42"));
        assert!(!pin.matches("0043"));
        assert!(!pin.matches("abcd"));
        assert!(!pin.matches(""));
    }
}
