//! Upstream providers the calculators query.
//!
//! The engine only reads snapshots of upstream history. Pagination, rate
//! limiting and retries are the provider's concern; the engine asks for a
//! single bounded page per call.

pub mod error;
pub mod github;

pub use error::{ProviderError, ProviderResult};
pub use github::GitHubClient;

use crate::models::{IncidentRecord, PipelineRun};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Source of historical pipeline runs
#[async_trait]
pub trait PipelineHistoryProvider: Send + Sync {
    /// List runs for a repository (`owner/name`) matching the query
    async fn list_runs(&self, repository: &str, query: &RunQuery) -> ProviderResult<Vec<PipelineRun>>;
}

/// Source of incident issues
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// List issues for a repository (`owner/name`) matching the query
    async fn list_issues(
        &self,
        repository: &str,
        query: &IssueQuery,
    ) -> ProviderResult<Vec<IncidentRecord>>;
}

/// Pipeline run listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQuery {
    pub branch: String,

    /// Server-side status filter (e.g. `success`)
    pub status: Option<String>,

    pub per_page: u32,
}

impl RunQuery {
    pub fn for_branch(branch: impl Into<String>, per_page: u32) -> Self {
        Self {
            branch: branch.into(),
            status: None,
            per_page,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Issue listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub state: String,
    pub labels: Vec<String>,

    /// Only issues updated at or after this instant
    pub since: Option<DateTime<Utc>>,

    pub per_page: u32,
}

impl IssueQuery {
    /// Closed issues carrying `label`
    pub fn closed_with_label(label: impl Into<String>, per_page: u32) -> Self {
        Self {
            state: "closed".to_string(),
            labels: vec![label.into()],
            since: None,
            per_page,
        }
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}

/// `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ProviderError::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
