//! Read-only status view of an election.

use ballot_election::Election;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, Serialize)]
pub struct ProposalStatus {
    pub index: usize,
    pub name: String,
    pub vote_count: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Status {
    pub administrator: String,
    pub proposals: Vec<ProposalStatus>,
    pub total_votes: u64,
    pub winning_proposal: usize,
    pub winner_name: String,
}

impl From<&Election> for Status {
    fn from(election: &Election) -> Self {
        let proposals = election
            .proposals()
            .iter()
            .enumerate()
            .map(|(index, p)| ProposalStatus {
                index,
                name: p.name.to_string(),
                vote_count: p.vote_count,
            })
            .collect();
        Self {
            administrator: election.administrator().to_string(),
            proposals,
            total_votes: election.total_votes(),
            winning_proposal: election.winning_proposal(),
            winner_name: election.winner_name().to_string(),
        }
    }
}

impl Status {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "administrator: {}", self.administrator)?;
        for p in &self.proposals {
            let marker = if p.index == self.winning_proposal { "*" } else { " " };
            writeln!(f, "{marker} #{:<3} {:<32} {}", p.index, p.name, p.vote_count)?;
        }
        writeln!(f, "total votes: {}", self.total_votes)?;
        write!(f, "winner: #{} {}", self.winning_proposal, self.winner_name)
    }
}
