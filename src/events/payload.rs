//! Decoding of GitHub webhook bodies into [`DeliveryEvent`]s

use crate::error::{AppError, Result};
use crate::models::DeliveryEvent;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Header naming the event kind of a delivery
pub const EVENT_HEADER: &str = "X-GitHub-Event";

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunPayload {
    workflow_run: HeadBranch,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct CheckRunPayload {
    check_run: CheckRun,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct CheckRun {
    check_suite: HeadBranch,
}

#[derive(Debug, Deserialize)]
struct CheckSuitePayload {
    check_suite: HeadBranch,
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct HeadBranch {
    #[serde(default)]
    head_branch: Option<String>,
}

fn decode<T: DeserializeOwned>(event_type: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Malformed {} payload: {}", event_type, e)))
}

/// Parse a webhook body according to its event kind
pub fn parse_webhook(event_type: &str, body: &[u8]) -> Result<DeliveryEvent> {
    let event = match event_type {
        "push" => {
            let payload: PushPayload = decode(event_type, body)?;
            DeliveryEvent::Push {
                repository: payload.repository.full_name,
                git_ref: payload.git_ref,
            }
        }
        "workflow_run" => {
            let payload: WorkflowRunPayload = decode(event_type, body)?;
            DeliveryEvent::WorkflowCompletion {
                repository: payload.repository.full_name,
                head_branch: payload.workflow_run.head_branch.unwrap_or_default(),
            }
        }
        "ping" => DeliveryEvent::Heartbeat,
        "check_run" => {
            let payload: CheckRunPayload = decode(event_type, body)?;
            tracing::info!(
                repository = %payload.repository.full_name,
                branch = payload.check_run.check_suite.head_branch.as_deref().unwrap_or_default(),
                "Received check_run event"
            );
            DeliveryEvent::Other {
                kind: event_type.to_string(),
            }
        }
        "check_suite" => {
            let payload: CheckSuitePayload = decode(event_type, body)?;
            tracing::info!(
                repository = %payload.repository.full_name,
                branch = payload.check_suite.head_branch.as_deref().unwrap_or_default(),
                "Received check_suite event"
            );
            DeliveryEvent::Other {
                kind: event_type.to_string(),
            }
        }
        other => {
            // Unknown kinds must still be well-formed JSON
            let _: serde_json::Value = decode(other, body)?;
            DeliveryEvent::Other {
                kind: other.to_string(),
            }
        }
    };

    Ok(event)
}
