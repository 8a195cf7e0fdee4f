use crate::models::DeliveryEvent;

const HEADS_PREFIX: &str = "refs/heads/";

/// The (repository, branch) pair a computation runs for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTarget {
    /// `owner/name`
    pub repository: String,
    pub branch: String,
}

/// Strip `refs/heads/`; any other ref is returned unchanged
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix(HEADS_PREFIX).unwrap_or(git_ref)
}

/// Resolve an event to the branch it should trigger computation for.
///
/// Heartbeats, unrecognized kinds, and events with an empty repository or
/// branch yield `None`.
pub fn normalize(event: &DeliveryEvent) -> Option<BranchTarget> {
    let (repository, branch) = match event {
        DeliveryEvent::Push {
            repository,
            git_ref,
        } => (repository.as_str(), branch_from_ref(git_ref)),
        DeliveryEvent::WorkflowCompletion {
            repository,
            head_branch,
        } => (repository.as_str(), head_branch.as_str()),
        DeliveryEvent::Heartbeat | DeliveryEvent::Other { .. } => return None,
    };

    if repository.is_empty() || branch.is_empty() {
        return None;
    }

    Some(BranchTarget {
        repository: repository.to_string(),
        branch: branch.to_string(),
    })
}
