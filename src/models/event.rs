use serde::{Deserialize, Serialize};

/// An inbound delivery notification, reduced to the fields that drive computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryEvent {
    /// Code pushed to a ref
    Push {
        repository: String,
        #[serde(rename = "ref")]
        git_ref: String,
    },

    /// A CI/CD workflow run finished
    WorkflowCompletion {
        repository: String,
        head_branch: String,
    },

    /// Liveness ping from the source-control platform
    Heartbeat,

    /// Any event kind the engine does not compute on
    Other { kind: String },
}

impl DeliveryEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &str {
        match self {
            DeliveryEvent::Push { .. } => "push",
            DeliveryEvent::WorkflowCompletion { .. } => "workflow_run",
            DeliveryEvent::Heartbeat => "ping",
            DeliveryEvent::Other { kind } => kind,
        }
    }
}
