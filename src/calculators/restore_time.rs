use super::{mean, MetricQuery, ReportingWindow};
use crate::models::IncidentRecord;
use crate::providers::{IssueQuery, IssueTracker};

/// Mean open-to-close time in hours of incidents associated with `branch`.
///
/// An issue qualifies when it carries `label`, was created inside `window`,
/// has both timestamps, and its body contains the branch name.
pub fn mean_restore_hours(
    incidents: &[IncidentRecord],
    branch: &str,
    label: &str,
    window: &ReportingWindow,
) -> f64 {
    mean(
        incidents
            .iter()
            .filter(|issue| issue.has_label(label))
            .filter(|issue| window.contains_opt(issue.created_at))
            .filter(|issue| issue.mentions_branch(branch))
            .filter_map(IncidentRecord::time_to_restore)
            .map(|d| d.num_milliseconds() as f64 / 3_600_000.0),
    )
}

/// Time to restore service for `query.branch`, in hours
pub async fn time_to_restore_service(tracker: &dyn IssueTracker, query: &MetricQuery<'_>) -> f64 {
    tracing::debug!(
        repository = %query.repository,
        branch = %query.branch,
        "Calculating time to restore service"
    );

    let issue_query = IssueQuery::closed_with_label(query.incident_label, query.page_size)
        .since(query.window.start());
    let incidents = match tracker.list_issues(query.repository, &issue_query).await {
        Ok(incidents) => incidents,
        Err(e) => {
            tracing::warn!(
                repository = %query.repository,
                branch = %query.branch,
                error = %e,
                "Failed to fetch incident issues"
            );
            return 0.0;
        }
    };

    let hours = mean_restore_hours(&incidents, query.branch, query.incident_label, &query.window);
    tracing::info!(branch = %query.branch, hours, "Calculated time to restore service");
    hours
}
