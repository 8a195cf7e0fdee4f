//! GitHub REST client
//!
//! Implements both upstream traits against the Actions runs and Issues
//! endpoints. Only the first page of each listing is read.

use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::models::{IncidentRecord, PipelineRun, RunOutcome};
use crate::providers::{
    IssueQuery, IssueTracker, PipelineHistoryProvider, ProviderError, ProviderResult, RepoSlug,
    RunQuery,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const API_VERSION: &str = "2022-11-28";

/// GitHub API client shared by the pipeline and issue providers
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsPage {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRun {
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    status: Option<String>,
    conclusion: Option<String>,
    #[serde(default)]
    head_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    name: String,
}

impl From<WorkflowRun> for PipelineRun {
    fn from(run: WorkflowRun) -> Self {
        // GitHub has no completion timestamp; the last update of a completed run is its end
        let completed_at = match run.status.as_deref() {
            Some("completed") => run.updated_at,
            _ => None,
        };

        PipelineRun {
            created_at: run.created_at,
            completed_at,
            outcome: RunOutcome::from_conclusion(run.conclusion.as_deref()),
            branch: run.head_branch.unwrap_or_default(),
        }
    }
}

impl From<Issue> for IncidentRecord {
    fn from(issue: Issue) -> Self {
        IncidentRecord {
            created_at: issue.created_at,
            closed_at: issue.closed_at,
            body: issue.body.unwrap_or_default(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

impl GitHubClient {
    /// Create a client authenticated with `token`
    pub fn new(config: &GitHubConfig, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::Configuration(format!("Invalid GitHub token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GitHub API request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PipelineHistoryProvider for GitHubClient {
    async fn list_runs(&self, repository: &str, query: &RunQuery) -> ProviderResult<Vec<PipelineRun>> {
        let slug: RepoSlug = repository.parse()?;

        let mut params = vec![
            ("branch", query.branch.clone()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(status) = &query.status {
            params.push(("status", status.clone()));
        }

        let path = format!("/repos/{}/{}/actions/runs", slug.owner, slug.name);
        let page: WorkflowRunsPage = self.get_json(&path, &params).await?;

        Ok(page.workflow_runs.into_iter().map(PipelineRun::from).collect())
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn list_issues(
        &self,
        repository: &str,
        query: &IssueQuery,
    ) -> ProviderResult<Vec<IncidentRecord>> {
        let slug: RepoSlug = repository.parse()?;

        let mut params = vec![
            ("state", query.state.clone()),
            ("per_page", query.per_page.to_string()),
        ];
        if !query.labels.is_empty() {
            params.push(("labels", query.labels.join(",")));
        }
        if let Some(since) = query.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        let path = format!("/repos/{}/{}/issues", slug.owner, slug.name);
        let issues: Vec<Issue> = self.get_json(&path, &params).await?;

        Ok(issues.into_iter().map(IncidentRecord::from).collect())
    }
}
