//! Proposals on the ballot.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

/// One entry of the fixed proposal slate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Display name, bounded at election creation.
    pub name: ProposalName,
    /// Accumulated weight of every ballot that landed here.
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(name: ProposalName) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}
