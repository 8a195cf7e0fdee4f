//! The four DORA indicators.
//!
//! Each calculator is a stateless async function of a provider and a
//! [`MetricQuery`]. A provider error is logged and degrades the calculator to
//! its zero result; it is never returned to the caller. Records missing a
//! timestamp a calculator needs are skipped silently.

mod change_failure_rate;
mod deployment_frequency;
mod lead_time;
mod restore_time;
mod window;

pub use change_failure_rate::{change_failure_rate, failure_rate_of};
pub use deployment_frequency::{deployment_frequency, tally_deployments, DeploymentFrequency};
pub use lead_time::{lead_time_for_changes, mean_lead_time_minutes};
pub use restore_time::{mean_restore_hours, time_to_restore_service};
pub use window::{ReportingWindow, DEFAULT_WINDOW_DAYS};

/// Inputs shared by every calculator for one orchestration pass
#[derive(Debug, Clone)]
pub struct MetricQuery<'a> {
    /// `owner/name`
    pub repository: &'a str,
    pub branch: &'a str,
    pub window: ReportingWindow,
    /// Upper bound on records per upstream request
    pub page_size: u32,
    /// Label an issue must carry to count as an incident
    pub incident_label: &'a str,
}

pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
