use serde::{Deserialize, Serialize};

/// The four indicators (plus raw counts) computed for one branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    /// Runs per day over the window; not capped at 1
    pub deployment_frequency: f64,

    /// Mean pipeline run duration for successful runs, in minutes
    pub lead_time_minutes: f64,

    /// Mean incident open-to-close time, in hours
    pub restore_time_hours: f64,

    /// Share of runs that concluded in failure, 0..=1
    pub change_failure_rate: f64,

    pub successful_count: u64,

    pub failed_count: u64,

    pub branch: String,
}

impl MetricSnapshot {
    /// All-zero snapshot
    pub fn empty(branch: impl Into<String>) -> Self {
        Self {
            deployment_frequency: 0.0,
            lead_time_minutes: 0.0,
            restore_time_hours: 0.0,
            change_failure_rate: 0.0,
            successful_count: 0,
            failed_count: 0,
            branch: branch.into(),
        }
    }
}
