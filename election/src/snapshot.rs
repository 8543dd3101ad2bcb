//! Snapshot encoding for handing election state to a persistence layer.
//!
//! The state machine does not own storage. Drivers call
//! [`Election::save_state`] after a mutation and [`Election::load_state`]
//! before the next one.

use crate::delegation;
use crate::engine::Election;
use crate::error::ElectionError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_types::VoterAddress;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Serializable image of an [`Election`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub administrator: VoterAddress,
    pub max_name_len: usize,
    pub proposals: Vec<Proposal>,
    /// Sorted by address so equal elections encode to equal bytes.
    pub voters: Vec<(VoterAddress, Voter)>,
}

impl From<&Election> for ElectionSnapshot {
    fn from(election: &Election) -> Self {
        let mut voters: Vec<_> = election
            .voters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        voters.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            administrator: election.administrator.clone(),
            max_name_len: election.max_name_len,
            proposals: election.proposals.clone(),
            voters,
        }
    }
}

impl TryFrom<ElectionSnapshot> for Election {
    type Error = ElectionError;

    fn try_from(snapshot: ElectionSnapshot) -> Result<Self, Self::Error> {
        if snapshot.proposals.is_empty() {
            return Err(ElectionError::Snapshot("no proposals".into()));
        }
        if let Some(p) = snapshot
            .proposals
            .iter()
            .find(|p| p.name.len() > snapshot.max_name_len)
        {
            return Err(ElectionError::Snapshot(format!(
                "proposal name {:?} exceeds {} bytes",
                p.name.as_str(),
                snapshot.max_name_len
            )));
        }

        let voters: HashMap<VoterAddress, Voter> = snapshot.voters.into_iter().collect();
        match voters.get(&snapshot.administrator) {
            Some(admin) if admin.has_rights() => {}
            _ => {
                return Err(ElectionError::Snapshot(format!(
                    "administrator {} has no voting rights",
                    snapshot.administrator
                )))
            }
        }

        for (address, voter) in &voters {
            if voter.delegate.is_some() && !voter.voted {
                return Err(ElectionError::Snapshot(format!(
                    "{address} delegated without being marked voted"
                )));
            }
            if voter.voted_proposal().is_some_and(|p| p >= snapshot.proposals.len()) {
                return Err(ElectionError::Snapshot(format!(
                    "{address} voted for missing proposal {}",
                    voter.vote
                )));
            }
        }
        delegation::check_acyclic(&voters).map_err(|address| {
            ElectionError::Snapshot(format!("delegation chain from {address} loops"))
        })?;

        Ok(Self {
            administrator: snapshot.administrator,
            max_name_len: snapshot.max_name_len,
            proposals: snapshot.proposals,
            voters,
        })
    }
}

impl Election {
    /// Encode the full election state with bincode.
    pub fn save_state(&self) -> Result<Vec<u8>, ElectionError> {
        bincode::serialize(&ElectionSnapshot::from(self))
            .map_err(|e| ElectionError::Snapshot(e.to_string()))
    }

    /// Decode and validate state produced by [`Election::save_state`].
    pub fn load_state(data: &[u8]) -> Result<Self, ElectionError> {
        let snapshot: ElectionSnapshot = bincode::deserialize(data)
            .map_err(|e| ElectionError::Snapshot(e.to_string()))?;
        Self::try_from(snapshot).inspect_err(|e| warn!("rejected election snapshot: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn addr(name: &str) -> VoterAddress {
        VoterAddress::new(name)
    }

    fn populated() -> Election {
        let chair = addr("chair");
        let mut e = Election::new(chair.clone(), ["Alpha", "Beta"], 32).unwrap();
        for name in ["a", "b", "c"] {
            e.grant_voting_rights(&chair, &addr(name)).unwrap();
        }
        e.delegate(&addr("a"), &addr("b")).unwrap();
        e.vote(&addr("b"), 1).unwrap();
        e.vote(&chair, 0).unwrap();
        e
    }

    #[test]
    fn restored_election_matches_and_keeps_working() {
        let e = populated();
        let bytes = e.save_state().unwrap();
        let mut restored = Election::load_state(&bytes).unwrap();

        assert_eq!(restored.tally(), vec![1, 2]);
        assert_eq!(restored.administrator(), &addr("chair"));
        assert_eq!(restored.voter(&addr("a")).delegate, Some(addr("b")));
        assert_eq!(restored.voter_count(), e.voter_count());

        restored.delegate(&addr("c"), &addr("a")).unwrap();
        assert_eq!(restored.tally(), vec![1, 3]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let e = populated();
        assert_eq!(e.save_state().unwrap(), e.save_state().unwrap());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = Election::load_state(&[0xff; 7]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Snapshot);
    }

    #[test]
    fn cyclic_delegation_in_snapshot_is_rejected() {
        let mut snapshot = ElectionSnapshot::from(&populated());
        for (address, voter) in snapshot.voters.iter_mut() {
            if address == &addr("b") {
                voter.delegate = Some(addr("a"));
            }
        }
        let err = Election::try_from(snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Snapshot);
    }

    #[test]
    fn overlong_name_in_snapshot_is_rejected() {
        let mut snapshot = ElectionSnapshot::from(&populated());
        snapshot.max_name_len = 3;
        let err = Election::try_from(snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Snapshot);
        assert!(err.to_string().contains("Alpha"));
    }

    #[test]
    fn delegator_not_marked_voted_is_rejected() {
        let mut snapshot = ElectionSnapshot::from(&populated());
        for (address, voter) in snapshot.voters.iter_mut() {
            if address == &addr("a") {
                voter.voted = false;
            }
        }
        let err = Election::try_from(snapshot).unwrap_err();
        assert!(err.to_string().contains("without being marked voted"));
    }

    #[test]
    fn long_uncompressed_chain_loads() {
        const N: usize = 10_000;
        let chair = addr("chair");
        let voters: Vec<VoterAddress> = (0..N).map(|i| addr(&format!("v{i}"))).collect();
        let mut e = Election::new(chair.clone(), ["Alpha", "Beta"], 32).unwrap();
        for v in &voters {
            e.grant_voting_rights(&chair, v).unwrap();
        }
        // forward order keeps every hop: v0 -> v1 -> ... -> v(N-1)
        for pair in voters.windows(2) {
            e.delegate(&pair[0], &pair[1]).unwrap();
        }

        let mut restored = Election::load_state(&e.save_state().unwrap()).unwrap();
        assert_eq!(restored.voter(&voters[0]).delegate, Some(voters[1].clone()));
        assert_eq!(restored.voter(&voters[N - 1]).weight, N as u64);

        restored.vote(&voters[N - 1], 1).unwrap();
        restored.delegate(&chair, &voters[0]).unwrap();
        assert_eq!(restored.tally(), vec![0, N as u64 + 1]);
    }

    #[test]
    fn out_of_range_vote_in_snapshot_is_rejected() {
        let mut snapshot = ElectionSnapshot::from(&populated());
        for (address, voter) in snapshot.voters.iter_mut() {
            if address == &addr("chair") {
                voter.vote = 9;
            }
        }
        assert!(Election::try_from(snapshot).is_err());
    }

    #[test]
    fn missing_administrator_is_rejected() {
        let mut snapshot = ElectionSnapshot::from(&populated());
        snapshot.voters.retain(|(address, _)| address != &addr("chair"));
        assert!(Election::try_from(snapshot).is_err());
    }
}
