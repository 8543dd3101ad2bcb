//! Scripted election operations.
//!
//! A script is a TOML document of `[[step]]` tables applied in order:
//!
//! ```toml
//! [[step]]
//! action = "grant"
//! caller = "chair"
//! target = "alice"
//!
//! [[step]]
//! action = "vote"
//! caller = "alice"
//! proposal = 1
//! ```

use ballot_election::{Election, ElectionError};
use ballot_types::VoterAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Grant {
        caller: VoterAddress,
        target: VoterAddress,
    },
    Delegate {
        caller: VoterAddress,
        to: VoterAddress,
    },
    Vote {
        caller: VoterAddress,
        proposal: usize,
    },
}

impl Step {
    pub fn apply(&self, election: &mut Election) -> Result<(), ElectionError> {
        match self {
            Self::Grant { caller, target } => election.grant_voting_rights(caller, target),
            Self::Delegate { caller, to } => election.delegate(caller, to),
            Self::Vote { caller, proposal } => election.vote(caller, *proposal),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant { caller, target } => write!(f, "{caller} grants rights to {target}"),
            Self::Delegate { caller, to } => write!(f, "{caller} delegates to {to}"),
            Self::Vote { caller, proposal } => write!(f, "{caller} votes for #{proposal}"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("step {index} ({step}) rejected: {source}")]
    Rejected {
        index: usize,
        step: Step,
        source: ElectionError,
    },
}

/// Result of running a script in lenient mode.
#[derive(Debug, Default)]
pub struct Outcome {
    pub applied: usize,
    pub rejected: Vec<(usize, ElectionError)>,
}

/// Apply every step of `script` to `election`.
///
/// A rejected step never changes the election. In strict mode the first
/// rejection stops the run; otherwise it is logged and the run continues.
pub fn run_script(
    election: &mut Election,
    script: &Script,
    strict: bool,
) -> Result<Outcome, ScriptError> {
    let mut outcome = Outcome::default();
    for (index, step) in script.steps.iter().enumerate() {
        match step.apply(election) {
            Ok(()) => outcome.applied += 1,
            Err(source) if strict => {
                return Err(ScriptError::Rejected {
                    index,
                    step: step.clone(),
                    source,
                })
            }
            Err(e) => {
                warn!(index, %step, "step rejected: {e}");
                outcome.rejected.push((index, e));
            }
        }
    }
    info!(
        applied = outcome.applied,
        rejected = outcome.rejected.len(),
        "script finished"
    );
    Ok(outcome)
}
