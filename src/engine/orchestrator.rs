use crate::calculators::{
    change_failure_rate, deployment_frequency, lead_time_for_changes, time_to_restore_service,
    MetricQuery, ReportingWindow, DEFAULT_WINDOW_DAYS,
};
use crate::config::Config;
use crate::events::normalize;
use crate::models::{DeliveryEvent, MetricSnapshot};
use crate::providers::{IssueTracker, PipelineHistoryProvider};
use crate::store::MetricsStore;
use std::sync::Arc;

/// Tunables for one orchestration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub window_days: u32,
    pub page_size: u32,
    pub incident_label: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            page_size: 100,
            incident_label: "incident".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window_days: config.computation.window_days,
            page_size: config.github.page_size,
            incident_label: config.github.incident_label.clone(),
        }
    }
}

/// Runs the four calculators for a branch and publishes the result
pub struct MetricsEngine {
    pipelines: Arc<dyn PipelineHistoryProvider>,
    issues: Arc<dyn IssueTracker>,
    store: Arc<MetricsStore>,
    settings: EngineSettings,
}

impl MetricsEngine {
    pub fn new(
        pipelines: Arc<dyn PipelineHistoryProvider>,
        issues: Arc<dyn IssueTracker>,
        store: Arc<MetricsStore>,
    ) -> Self {
        Self {
            pipelines,
            issues,
            store,
            settings: EngineSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<MetricsStore> {
        &self.store
    }

    /// Normalize `event` and compute for its branch; `None` if the event is ignored
    pub async fn handle_event(&self, event: &DeliveryEvent) -> Option<MetricSnapshot> {
        match normalize(event) {
            Some(target) => {
                tracing::info!(
                    event = event.kind(),
                    repository = %target.repository,
                    branch = %target.branch,
                    "Received delivery event"
                );
                Some(self.compute(&target.repository, &target.branch).await)
            }
            None => {
                tracing::info!(event = event.kind(), "Ignoring delivery event");
                None
            }
        }
    }

    /// Compute over the trailing window ending now
    pub async fn compute(&self, repository: &str, branch: &str) -> MetricSnapshot {
        let window = ReportingWindow::trailing(self.settings.window_days);
        self.compute_in(repository, branch, window).await
    }

    /// Compute over an explicit window, record the result, and return it.
    ///
    /// Never fails: every calculator degrades to zero on its own upstream error.
    pub async fn compute_in(
        &self,
        repository: &str,
        branch: &str,
        window: ReportingWindow,
    ) -> MetricSnapshot {
        tracing::info!(
            repository = %repository,
            branch = %branch,
            window_days = window.days(),
            "Calculating DORA metrics"
        );

        let query = MetricQuery {
            repository,
            branch,
            window,
            page_size: self.settings.page_size,
            incident_label: &self.settings.incident_label,
        };

        let (frequency, lead_time, restore_time, failure_rate) = tokio::join!(
            deployment_frequency(self.pipelines.as_ref(), &query),
            lead_time_for_changes(self.pipelines.as_ref(), &query),
            time_to_restore_service(self.issues.as_ref(), &query),
            change_failure_rate(self.pipelines.as_ref(), &query),
        );

        let snapshot = MetricSnapshot {
            deployment_frequency: frequency.per_day,
            lead_time_minutes: lead_time,
            restore_time_hours: restore_time,
            change_failure_rate: failure_rate,
            successful_count: frequency.successful,
            failed_count: frequency.failed,
            branch: branch.to_string(),
        };

        self.store.record(&snapshot);
        snapshot
    }
}
