use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed issue from the tracker that may represent a production incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub created_at: Option<DateTime<Utc>>,

    pub closed_at: Option<DateTime<Utc>>,

    /// Free text; the only link between an incident and a branch
    pub body: String,

    pub labels: Vec<String>,
}

impl IncidentRecord {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Substring association: the branch name appears anywhere in the body
    pub fn mentions_branch(&self, branch: &str) -> bool {
        self.body.contains(branch)
    }

    /// Time from opening to close, when both are known
    pub fn time_to_restore(&self) -> Option<chrono::Duration> {
        match (self.created_at, self.closed_at) {
            (Some(created), Some(closed)) => Some(closed - created),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(body: &str) -> IncidentRecord {
        IncidentRecord {
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
            closed_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap()),
            body: body.to_string(),
            labels: vec!["incident".to_string(), "sev2".to_string()],
        }
    }

    #[test]
    fn test_label_match_is_exact() {
        let r = record("outage");
        assert!(r.has_label("incident"));
        assert!(!r.has_label("incid"));
    }

    #[test]
    fn test_branch_association_is_substring() {
        let r = record("Rollback of release/1.2 after checkout errors");
        assert!(r.mentions_branch("release/1.2"));
        assert!(r.mentions_branch("release"));
        assert!(!r.mentions_branch("main"));
    }

    #[test]
    fn test_time_to_restore() {
        assert_eq!(record("x").time_to_restore(), Some(chrono::Duration::hours(6)));

        let mut open = record("x");
        open.closed_at = None;
        assert_eq!(open.time_to_restore(), None);
    }
}
