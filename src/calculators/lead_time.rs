use super::{mean, MetricQuery, ReportingWindow};
use crate::models::PipelineRun;
use crate::providers::{PipelineHistoryProvider, RunQuery};

/// Mean run duration in minutes over fully timestamped runs created in `window`.
///
/// This is pipeline duration, not commit-to-production time.
pub fn mean_lead_time_minutes(runs: &[PipelineRun], window: &ReportingWindow) -> f64 {
    mean(
        runs.iter()
            .filter(|run| window.contains_opt(run.created_at))
            .filter_map(PipelineRun::duration)
            .map(|d| d.num_milliseconds() as f64 / 60_000.0),
    )
}

/// Lead time for changes for `query.branch`, in minutes
pub async fn lead_time_for_changes(
    provider: &dyn PipelineHistoryProvider,
    query: &MetricQuery<'_>,
) -> f64 {
    tracing::debug!(
        repository = %query.repository,
        branch = %query.branch,
        "Calculating lead time for changes"
    );

    let run_query = RunQuery::for_branch(query.branch, query.page_size).with_status("success");
    let runs = match provider.list_runs(query.repository, &run_query).await {
        Ok(runs) => runs,
        Err(e) => {
            tracing::warn!(
                repository = %query.repository,
                branch = %query.branch,
                error = %e,
                "Failed to fetch workflow runs for lead time"
            );
            return 0.0;
        }
    };

    let minutes = mean_lead_time_minutes(&runs, &query.window);
    tracing::info!(branch = %query.branch, minutes, "Calculated lead time for changes");
    minutes
}
