use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Final outcome of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunOutcome {
    Success,
    Failure,
    /// Cancelled, skipped, timed out, still running, ...
    Other,
}

impl RunOutcome {
    /// Map a provider conclusion string; `None` means the run has not concluded
    pub fn from_conclusion(conclusion: Option<&str>) -> Self {
        match conclusion {
            Some("success") => RunOutcome::Success,
            Some("failure") => RunOutcome::Failure,
            _ => RunOutcome::Other,
        }
    }
}

/// Snapshot of one historical pipeline run as reported upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub created_at: Option<DateTime<Utc>>,

    /// `None` while the run is in progress
    pub completed_at: Option<DateTime<Utc>>,

    pub outcome: RunOutcome,

    pub branch: String,
}

impl PipelineRun {
    pub fn new(
        branch: impl Into<String>,
        outcome: RunOutcome,
        created_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            created_at,
            completed_at,
            outcome,
            branch: branch.into(),
        }
    }

    /// Run duration, when both boundary timestamps are known
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.created_at, self.completed_at) {
            (Some(created), Some(completed)) => Some(completed - created),
            _ => None,
        }
    }
}
