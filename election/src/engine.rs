//! The election state machine.
//!
//! One [`Election`] owns the administrator identity, the fixed proposal
//! slate, and every voter record. All mutations go through
//! [`Election::grant_voting_rights`], [`Election::delegate`] and
//! [`Election::vote`]; each checks every precondition before touching state,
//! so a rejected call leaves the election exactly as it was.

use crate::delegation;
use crate::error::ElectionError;
use crate::proposal::Proposal;
use crate::voter::Voter;
use ballot_types::{ProposalName, VoterAddress};
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Election {
    pub(crate) administrator: VoterAddress,
    pub(crate) max_name_len: usize,
    pub(crate) proposals: Vec<Proposal>,
    pub(crate) voters: HashMap<VoterAddress, Voter>,
}

impl Election {
    /// Create an election with a fixed proposal slate.
    ///
    /// The administrator starts with one unit of weight. Every name must fit
    /// in `max_name_len` bytes.
    pub fn new<I, S>(
        administrator: VoterAddress,
        proposal_names: I,
        max_name_len: usize,
    ) -> Result<Self, ElectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let proposals = proposal_names
            .into_iter()
            .map(|raw| ProposalName::new(raw, max_name_len).map(Proposal::new))
            .collect::<Result<Vec<_>, _>>()?;
        if proposals.is_empty() {
            return Err(ElectionError::EmptyProposalList);
        }

        let mut voters = HashMap::new();
        voters.insert(administrator.clone(), Voter::with_rights());

        debug!(
            administrator = %administrator,
            proposals = proposals.len(),
            "election created"
        );
        Ok(Self {
            administrator,
            max_name_len,
            proposals,
            voters,
        })
    }

    /// Give `target` one unit of voting weight. Administrator only.
    pub fn grant_voting_rights(
        &mut self,
        caller: &VoterAddress,
        target: &VoterAddress,
    ) -> Result<(), ElectionError> {
        if caller != &self.administrator {
            return Err(ElectionError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if let Some(voter) = self.voters.get(target) {
            if voter.voted {
                return Err(ElectionError::AlreadyVoted(target.clone()));
            }
            if voter.has_rights() {
                return Err(ElectionError::AlreadyHasRights(target.clone()));
            }
        }

        self.voters.entry(target.clone()).or_default().weight = 1;
        debug!(target = %target, "voting rights granted");
        Ok(())
    }

    /// Hand the caller's weight to `to`, or to whoever `to` has delegated to.
    ///
    /// The caller's record remembers the final holder, not `to`. If that
    /// holder already voted, the weight goes straight onto their proposal;
    /// otherwise it is banked on the holder's own weight.
    pub fn delegate(
        &mut self,
        caller: &VoterAddress,
        to: &VoterAddress,
    ) -> Result<(), ElectionError> {
        let sender = self.voter(caller);
        if sender.voted {
            return Err(ElectionError::AlreadyVoted(caller.clone()));
        }

        let target = delegation::resolve(&self.voters, caller, to)?.clone();
        let holder = self.voter(&target);
        if holder.voted {
            self.credit(holder.vote, sender.weight)?;
        } else {
            let banked = holder
                .weight
                .checked_add(sender.weight)
                .ok_or(ElectionError::WeightOverflow)?;
            self.voters.entry(target.clone()).or_default().weight = banked;
        }

        debug!(
            caller = %caller,
            to = %to,
            resolved = %target,
            weight = sender.weight,
            applied = holder.voted,
            "vote delegated"
        );
        let record = self.voters.entry(caller.clone()).or_default();
        record.voted = true;
        record.delegate = Some(target);
        Ok(())
    }

    /// Cast the caller's full weight for `proposal`.
    pub fn vote(&mut self, caller: &VoterAddress, proposal: usize) -> Result<(), ElectionError> {
        let weight = match self.voters.get(caller) {
            Some(voter) if voter.has_rights() => {
                if voter.voted {
                    return Err(ElectionError::AlreadyVoted(caller.clone()));
                }
                voter.weight
            }
            _ => return Err(ElectionError::NoRightToVote(caller.clone())),
        };

        self.credit(proposal, weight)?;
        let record = self.voters.entry(caller.clone()).or_default();
        record.voted = true;
        record.vote = proposal;
        debug!(caller = %caller, proposal, weight, "vote cast");
        Ok(())
    }

    /// Add `amount` to a proposal's count.
    ///
    /// The only place counts change; both voting and delegation to a voter
    /// who already voted land here. Fails without mutating on a bad index or
    /// overflow.
    fn credit(&mut self, index: usize, amount: u64) -> Result<(), ElectionError> {
        let count = self.proposals.len();
        let proposal = self
            .proposals
            .get_mut(index)
            .ok_or(ElectionError::InvalidProposal { index, count })?;
        proposal.vote_count = proposal
            .vote_count
            .checked_add(amount)
            .ok_or(ElectionError::WeightOverflow)?;
        Ok(())
    }

    /// Index of the leading proposal.
    ///
    /// A later proposal only takes the lead with a strictly greater count, so
    /// ties go to the lowest index and an untouched election reports 0.
    pub fn winning_proposal(&self) -> usize {
        let mut winning = 0;
        let mut best = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > best {
                best = proposal.vote_count;
                winning = index;
            }
        }
        winning
    }

    pub fn winner_name(&self) -> &ProposalName {
        &self.proposals[self.winning_proposal()].name
    }

    pub fn administrator(&self) -> &VoterAddress {
        &self.administrator
    }

    pub fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn proposal(&self, index: usize) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Current state of `address`. Unseen identities get a default record;
    /// nothing is inserted.
    pub fn voter(&self, address: &VoterAddress) -> Voter {
        self.voters.get(address).cloned().unwrap_or_default()
    }

    /// Number of identities with a materialised record.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn voters(&self) -> impl Iterator<Item = (&VoterAddress, &Voter)> {
        self.voters.iter()
    }

    /// Vote count of every proposal, in index order.
    pub fn tally(&self) -> Vec<u64> {
        self.proposals.iter().map(|p| p.vote_count).collect()
    }

    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }
}
