use super::{MetricQuery, ReportingWindow};
use crate::models::{PipelineRun, RunOutcome};
use crate::providers::{PipelineHistoryProvider, RunQuery};

/// Deployment frequency plus the counts it was derived from
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeploymentFrequency {
    /// Runs per day over the window
    pub per_day: f64,
    pub successful: u64,
    /// Every qualifying run that did not succeed, including in-progress and cancelled
    pub failed: u64,
}

/// Count qualifying runs in `window` and derive runs per day
pub fn tally_deployments(runs: &[PipelineRun], window: &ReportingWindow) -> DeploymentFrequency {
    let (successful, failed) = runs
        .iter()
        .filter(|run| window.contains_opt(run.created_at))
        .fold((0u64, 0u64), |(ok, failed), run| {
            if run.outcome == RunOutcome::Success {
                (ok + 1, failed)
            } else {
                (ok, failed + 1)
            }
        });

    let per_day = if window.days() == 0 {
        0.0
    } else {
        (successful + failed) as f64 / f64::from(window.days())
    };

    DeploymentFrequency {
        per_day,
        successful,
        failed,
    }
}

/// Deployment frequency for `query.branch`
pub async fn deployment_frequency(
    provider: &dyn PipelineHistoryProvider,
    query: &MetricQuery<'_>,
) -> DeploymentFrequency {
    tracing::debug!(
        repository = %query.repository,
        branch = %query.branch,
        "Calculating deployment frequency"
    );

    let run_query = RunQuery::for_branch(query.branch, query.page_size);
    let runs = match provider.list_runs(query.repository, &run_query).await {
        Ok(runs) => runs,
        Err(e) => {
            tracing::warn!(
                repository = %query.repository,
                branch = %query.branch,
                error = %e,
                "Failed to fetch workflow runs for deployment frequency"
            );
            return DeploymentFrequency::default();
        }
    };

    let result = tally_deployments(&runs, &query.window);
    tracing::info!(
        branch = %query.branch,
        per_day = result.per_day,
        successful = result.successful,
        failed = result.failed,
        "Calculated deployment frequency"
    );
    result
}
