//! Delegation-chain resolution.
//!
//! Every voter points at no more than one successor, so the delegation graph
//! is a set of chains stored as an identity-keyed map. Resolution walks a
//! chain iteratively with a visited set instead of following references.

use crate::error::ElectionError;
use crate::voter::Voter;
use ballot_types::VoterAddress;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Follow delegate pointers from `to` until reaching a voter who has not
/// delegated, and return that voter's address.
///
/// Fails with [`ElectionError::CycleDetected`] if the walk reaches
/// `delegator` (including `to == delegator`). A walk that revisits any other
/// address, which can only happen with corrupted state, fails the same way.
/// Each step visits a new address, so the walk ends after no more than
/// `voters.len() + 1` steps.
pub fn resolve<'a>(
    voters: &'a HashMap<VoterAddress, Voter>,
    delegator: &VoterAddress,
    to: &'a VoterAddress,
) -> Result<&'a VoterAddress, ElectionError> {
    let mut current = to;
    let mut visited = HashSet::new();
    loop {
        if current == delegator || !visited.insert(current) {
            return Err(ElectionError::CycleDetected(delegator.clone()));
        }
        match voters.get(current).and_then(|v| v.delegate.as_ref()) {
            Some(next) => {
                trace!(from = %current, to = %next, "following delegation hop");
                current = next;
            }
            None => return Ok(current),
        }
    }
}

/// Check that every delegate chain in `voters` ends at a voter who has not
/// delegated.
///
/// Runs in time linear in the number of voters: each walk stops at the first
/// address already proven to reach a chain end. On failure returns an address
/// whose chain loops.
pub fn check_acyclic(voters: &HashMap<VoterAddress, Voter>) -> Result<(), VoterAddress> {
    let mut settled: HashSet<&VoterAddress> = HashSet::new();
    let mut path: HashSet<&VoterAddress> = HashSet::new();
    for start in voters.keys() {
        let mut current = start;
        loop {
            if settled.contains(current) {
                break;
            }
            if !path.insert(current) {
                return Err(start.clone());
            }
            match voters.get(current).and_then(|v| v.delegate.as_ref()) {
                Some(next) => current = next,
                None => break,
            }
        }
        settled.extend(path.drain());
    }
    Ok(())
}
