//! Voter identity type.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The identity of a participant in the election.
///
/// Authentication happens outside the state machine; by the time an address
/// reaches the election it is trusted to name the caller.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct VoterAddress(String);

impl VoterAddress {
    /// Create an address from a raw string without validation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An address is well-formed when it is non-empty and has no whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && !self.0.chars().any(char::is_whitespace)
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VoterAddress {
    type Error = TypesError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let address = Self(raw);
        if address.is_valid() {
            Ok(address)
        } else {
            Err(TypesError::InvalidAddress(address.0))
        }
    }
}

impl FromStr for VoterAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl From<&str> for VoterAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_identity() {
        let addr: VoterAddress = "0x5b38da6a701c568545dcfcb03fcb875f56beddc4".parse().unwrap();
        assert!(addr.is_valid());
        assert_eq!(addr.as_str(), "0x5b38da6a701c568545dcfcb03fcb875f56beddc4");
    }

    #[test]
    fn parse_rejects_empty_and_whitespace() {
        assert!("".parse::<VoterAddress>().is_err());
        assert!("chair person".parse::<VoterAddress>().is_err());
    }

    #[test]
    fn deserialize_applies_the_same_check() {
        let ok: Result<VoterAddress, _> = serde_json::from_str(r#""alice""#);
        assert_eq!(ok.unwrap(), VoterAddress::new("alice"));
        assert!(serde_json::from_str::<VoterAddress>(r#""""#).is_err());
        assert!(serde_json::from_str::<VoterAddress>(r#""chair person""#).is_err());
    }

    #[test]
    fn ordering_follows_raw_string() {
        assert!(VoterAddress::new("alice") < VoterAddress::new("bob"));
    }
}
