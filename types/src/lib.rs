//! Fundamental types for the ballot election.
//!
//! This crate defines the small value types shared by the state machine and
//! its drivers: voter identities, bounded proposal names, and their errors.

pub mod address;
pub mod error;
pub mod name;

pub use address::VoterAddress;
pub use error::{NameTooLong, TypesError};
pub use name::ProposalName;
