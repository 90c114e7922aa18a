//! Reward reporting boundary
//!
//! A finished run whose score clears the threshold is handed to a
//! [`RewardReporter`] exactly once. What the reporter does with it (ledger
//! transaction, HTTP call, nothing) is outside the simulation; its outcome is
//! only surfaced as a [`RewardStatus`] and never touches run state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a reward report did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    /// The collaborator tried and failed
    #[error("reward transaction failed: {0}")]
    Failed(String),
    /// The collaborator (or its user) refused the request
    #[error("reward transaction rejected: {0}")]
    Rejected(String),
}

/// Outcome of a reward report, as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardStatus {
    Success,
    Failed,
    Rejected,
}

impl RewardStatus {
    /// Status line for the render sink
    pub fn message(&self) -> &'static str {
        match self {
            RewardStatus::Success => "Transaction successful, reward sent!",
            RewardStatus::Failed => "Transaction failed",
            RewardStatus::Rejected => "Transaction rejected",
        }
    }
}

impl From<&Result<(), RewardError>> for RewardStatus {
    fn from(result: &Result<(), RewardError>) -> Self {
        match result {
            Ok(()) => RewardStatus::Success,
            Err(RewardError::Failed(_)) => RewardStatus::Failed,
            Err(RewardError::Rejected(_)) => RewardStatus::Rejected,
        }
    }
}

/// External collaborator that receives qualifying final scores
pub trait RewardReporter {
    fn report(&mut self, final_score: u64) -> Result<(), RewardError>;
}

impl<F> RewardReporter for F
where
    F: FnMut(u64) -> Result<(), RewardError>,
{
    fn report(&mut self, final_score: u64) -> Result<(), RewardError> {
        self(final_score)
    }
}

/// Reporter that only logs; used by headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl RewardReporter for LogReporter {
    fn report(&mut self, final_score: u64) -> Result<(), RewardError> {
        log::info!("Reward requested for final score {}", final_score);
        Ok(())
    }
}
