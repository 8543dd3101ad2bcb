use ballot_types::{NameTooLong, VoterAddress};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("{caller} is not the administrator")]
    Unauthorized { caller: VoterAddress },

    #[error("{0} has already voted")]
    AlreadyVoted(VoterAddress),

    #[error("{0} already has voting rights")]
    AlreadyHasRights(VoterAddress),

    #[error("{0} has no right to vote")]
    NoRightToVote(VoterAddress),

    #[error("proposal index {index} out of range (election has {count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("delegation from {0} loops back to itself")]
    CycleDetected(VoterAddress),

    #[error("an election needs at least one proposal")]
    EmptyProposalList,

    #[error(transparent)]
    ProposalName(#[from] NameTooLong),

    #[error("arithmetic overflow while adding weight")]
    WeightOverflow,

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Fieldless category of an [`ElectionError`], for drivers that only need
/// to know which rule rejected a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    AlreadyVoted,
    AlreadyHasRights,
    NoRightToVote,
    InvalidProposal,
    CycleDetected,
    EmptyProposalList,
    ProposalName,
    WeightOverflow,
    Snapshot,
}

impl ElectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AlreadyVoted(_) => ErrorKind::AlreadyVoted,
            Self::AlreadyHasRights(_) => ErrorKind::AlreadyHasRights,
            Self::NoRightToVote(_) => ErrorKind::NoRightToVote,
            Self::InvalidProposal { .. } => ErrorKind::InvalidProposal,
            Self::CycleDetected(_) => ErrorKind::CycleDetected,
            Self::EmptyProposalList => ErrorKind::EmptyProposalList,
            Self::ProposalName(_) => ErrorKind::ProposalName,
            Self::WeightOverflow => ErrorKind::WeightOverflow,
            Self::Snapshot(_) => ErrorKind::Snapshot,
        }
    }
}
