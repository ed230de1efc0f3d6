//! Operation identifiers
//!
//! Ids are issued sequentially by the ledger's id generator and rendered as
//! plain integers. Ordering is numeric, so "10" sorts after "9".

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier shared by finance and neutral operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Wrap a raw sequence number
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw sequence number
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OperationId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for OperationId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_plain_integer() {
        assert_eq!(OperationId::new(48).to_string(), "48");
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(OperationId::new(9) < OperationId::new(10));
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 12 ".parse::<OperationId>().unwrap(), OperationId::new(12));
        assert!("abc".parse::<OperationId>().is_err());
    }
}
