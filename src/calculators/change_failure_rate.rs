use super::{MetricQuery, ReportingWindow};
use crate::models::{PipelineRun, RunOutcome};
use crate::providers::{PipelineHistoryProvider, RunQuery};

/// Share of runs created in `window` whose outcome is exactly `Failure`
pub fn failure_rate_of(runs: &[PipelineRun], window: &ReportingWindow) -> f64 {
    let (total, failed) = runs
        .iter()
        .filter(|run| window.contains_opt(run.created_at))
        .fold((0u64, 0u64), |(total, failed), run| {
            let failed = failed + u64::from(run.outcome == RunOutcome::Failure);
            (total + 1, failed)
        });

    if total == 0 {
        0.0
    } else {
        failed as f64 / total as f64
    }
}

/// Change failure rate for `query.branch`
pub async fn change_failure_rate(
    provider: &dyn PipelineHistoryProvider,
    query: &MetricQuery<'_>,
) -> f64 {
    tracing::debug!(
        repository = %query.repository,
        branch = %query.branch,
        "Calculating change failure rate"
    );

    let run_query = RunQuery::for_branch(query.branch, query.page_size);
    let runs = match provider.list_runs(query.repository, &run_query).await {
        Ok(runs) => runs,
        Err(e) => {
            tracing::warn!(
                repository = %query.repository,
                branch = %query.branch,
                error = %e,
                "Failed to fetch workflow runs for change failure rate"
            );
            return 0.0;
        }
    };

    let rate = failure_rate_of(&runs, &query.window);
    tracing::info!(branch = %query.branch, rate, "Calculated change failure rate");
    rate
}
