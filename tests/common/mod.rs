//! Common test utilities for the metrics engine
//!
//! In-memory providers, record builders and helpers for reading the
//! Prometheus exposition text back.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dora_metrics::models::{IncidentRecord, PipelineRun, RunOutcome};
use dora_metrics::providers::{
    IssueQuery, IssueTracker, PipelineHistoryProvider, ProviderError, ProviderResult, RunQuery,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Pipeline history served from memory, filtered the way the API filters
#[derive(Default)]
pub struct MockPipelines {
    runs: Vec<PipelineRun>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockPipelines {
    pub fn new(runs: Vec<PipelineRun>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PipelineHistoryProvider for MockPipelines {
    async fn list_runs(&self, _repository: &str, query: &RunQuery) -> ProviderResult<Vec<PipelineRun>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ProviderError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }

        Ok(self
            .runs
            .iter()
            .filter(|run| run.branch == query.branch)
            .filter(|run| match query.status.as_deref() {
                Some(status) => run.outcome.to_string() == status,
                None => true,
            })
            .take(query.per_page as usize)
            .cloned()
            .collect())
    }
}

/// Issue tracker served from memory; filters by label only
#[derive(Default)]
pub struct MockIssues {
    issues: Vec<IncidentRecord>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockIssues {
    pub fn new(issues: Vec<IncidentRecord>) -> Self {
        Self {
            issues,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueTracker for MockIssues {
    async fn list_issues(
        &self,
        _repository: &str,
        query: &IssueQuery,
    ) -> ProviderResult<Vec<IncidentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ProviderError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }

        Ok(self
            .issues
            .iter()
            .filter(|issue| query.labels.iter().all(|l| issue.has_label(l)))
            .take(query.per_page as usize)
            .cloned()
            .collect())
    }
}

/// A completed run on `branch` created `days_ago` before `now`, lasting `minutes`
pub fn run(
    branch: &str,
    outcome: RunOutcome,
    now: DateTime<Utc>,
    days_ago: i64,
    minutes: i64,
) -> PipelineRun {
    let created = now - Duration::days(days_ago);
    PipelineRun::new(
        branch,
        outcome,
        Some(created),
        Some(created + Duration::minutes(minutes)),
    )
}

/// A closed incident opened `days_ago` before `now`, restored after `hours`
pub fn incident(
    body: &str,
    label: &str,
    now: DateTime<Utc>,
    days_ago: i64,
    hours: i64,
) -> IncidentRecord {
    let created = now - Duration::days(days_ago);
    IncidentRecord {
        created_at: Some(created),
        closed_at: Some(created + Duration::hours(hours)),
        body: body.to_string(),
        labels: vec![label.to_string()],
    }
}

/// Helper function to parse Prometheus exposition format
/// Returns the sample lines grouped by metric family
pub fn parse_prometheus_output(output: &str) -> HashMap<String, Vec<String>> {
    let mut metrics = HashMap::new();
    let mut current_metric = String::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("# HELP") || line.starts_with("# TYPE") {
            if let Some(name) = line.split_whitespace().nth(2) {
                current_metric = name.to_string();
            }
        } else if !line.starts_with('#') && !current_metric.is_empty() {
            metrics
                .entry(current_metric.clone())
                .or_insert_with(Vec::new)
                .push(line.to_string());
        }
    }

    metrics
}

/// Extract metric value from a Prometheus output line
/// Example: `dora_change_failure_rate{branch="main"} 0.3` -> Some(0.3)
pub fn extract_metric_value(line: &str) -> Option<f64> {
    line.split_whitespace().last()?.parse::<f64>().ok()
}

/// Value of `metric` for `branch`, if exposed
pub fn sample_for(output: &str, metric: &str, branch: &str) -> Option<f64> {
    let label = format!("branch=\"{}\"", branch);
    parse_prometheus_output(output)
        .get(metric)?
        .iter()
        .find(|line| line.contains(&label))
        .and_then(|line| extract_metric_value(line))
}

/// Absolute-difference float comparison
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metric_value() {
        assert_eq!(extract_metric_value("m{branch=\"main\"} 42.5"), Some(42.5));
        assert_eq!(extract_metric_value("invalid"), None);
    }

    #[test]
    fn test_sample_for() {
        let output = "# HELP m Test\n# TYPE m gauge\nm{branch=\"a\"} 1\nm{branch=\"b\"} 2\n";
        assert_eq!(sample_for(output, "m", "b"), Some(2.0));
        assert_eq!(sample_for(output, "m", "c"), None);
    }
}
