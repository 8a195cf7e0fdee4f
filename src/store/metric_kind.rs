use crate::models::MetricSnapshot;
use strum::{Display, EnumIter, IntoEnumIterator};

/// One of the six exported gauges
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum MetricKind {
    DeploymentFrequency,
    LeadTimeForChanges,
    TimeToRestoreService,
    ChangeFailureRate,
    SuccessfulDeployments,
    FailedDeployments,
}

impl MetricKind {
    /// Exposition metric name
    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::DeploymentFrequency => "dora_deployment_frequency",
            MetricKind::LeadTimeForChanges => "dora_lead_time_for_changes_minutes",
            MetricKind::TimeToRestoreService => "dora_time_to_restore_service",
            MetricKind::ChangeFailureRate => "dora_change_failure_rate",
            MetricKind::SuccessfulDeployments => "dora_successful_deployments",
            MetricKind::FailedDeployments => "dora_failed_deployments",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            MetricKind::DeploymentFrequency => "Deployment Frequency metric (runs per day)",
            MetricKind::LeadTimeForChanges => "Lead Time for Changes metric (in minutes)",
            MetricKind::TimeToRestoreService => "Time to Restore Service metric (in hours)",
            MetricKind::ChangeFailureRate => "Change Failure Rate metric",
            MetricKind::SuccessfulDeployments => {
                "Number of successful deployments in the reporting window"
            }
            MetricKind::FailedDeployments => "Number of failed deployments in the reporting window",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MetricKind::iter().find(|kind| kind.name() == name)
    }

    /// The snapshot field this gauge carries
    pub fn reading(&self, snapshot: &MetricSnapshot) -> f64 {
        match self {
            MetricKind::DeploymentFrequency => snapshot.deployment_frequency,
            MetricKind::LeadTimeForChanges => snapshot.lead_time_minutes,
            MetricKind::TimeToRestoreService => snapshot.restore_time_hours,
            MetricKind::ChangeFailureRate => snapshot.change_failure_rate,
            MetricKind::SuccessfulDeployments => snapshot.successful_count as f64,
            MetricKind::FailedDeployments => snapshot.failed_count as f64,
        }
    }
}
