//! Bounded proposal display names.

use crate::error::NameTooLong;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a proposal, limited to a fixed number of bytes.
///
/// The bound is chosen once per election; names are opaque text and are never
/// interpreted by the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalName(String);

impl ProposalName {
    /// Default bound: one 32-byte name slot.
    pub const DEFAULT_MAX_LEN: usize = 32;

    /// Create a name, rejecting it if it exceeds `max_len` bytes.
    pub fn new(raw: impl Into<String>, max_len: usize) -> Result<Self, NameTooLong> {
        let name = raw.into();
        if name.len() > max_len {
            return Err(NameTooLong {
                len: name.len(),
                max: max_len,
                name,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProposalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
