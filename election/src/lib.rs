//! Single-election voting state machine.
//!
//! An administrator fixes a slate of proposals and hands out voting rights.
//! Voters either vote directly or delegate their weight to another voter
//! before voting; delegated weight follows the delegate chain to its final
//! holder. The tally can be queried at any point.
//!
//! Every mutating call is all-or-nothing: preconditions are checked before
//! any field changes, and a rejection leaves the election untouched.

pub mod delegation;
pub mod engine;
pub mod error;
pub mod proposal;
pub mod snapshot;
pub mod voter;

pub use engine::Election;
pub use error::{ElectionError, ErrorKind};
pub use proposal::Proposal;
pub use snapshot::ElectionSnapshot;
pub use voter::Voter;
