//! Per-identity voter records.

use ballot_types::VoterAddress;
use serde::{Deserialize, Serialize};

/// State held for one identity.
///
/// Records are materialised lazily; an identity the election has never seen
/// behaves exactly like `Voter::default()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Number of votes this identity's ballot represents. Zero means no rights.
    pub weight: u64,
    /// Set by a direct vote or a completed delegation. Never cleared.
    pub voted: bool,
    /// Final holder of this voter's weight, if they delegated.
    pub delegate: Option<VoterAddress>,
    /// Index of the chosen proposal; meaningful only for a direct vote.
    pub vote: usize,
}

impl Voter {
    /// A fresh record holding one unit of weight.
    pub fn with_rights() -> Self {
        Self {
            weight: 1,
            ..Self::default()
        }
    }

    pub fn has_rights(&self) -> bool {
        self.weight != 0
    }

    pub fn has_delegated(&self) -> bool {
        self.delegate.is_some()
    }

    /// The proposal this voter chose directly, if any.
    ///
    /// Delegators report `None`: their weight landed wherever their delegate
    /// chose.
    pub fn voted_proposal(&self) -> Option<usize> {
        if self.voted && self.delegate.is_none() {
            Some(self.vote)
        } else {
            None
        }
    }
}
