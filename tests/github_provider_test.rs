//! GitHub client against a mock HTTP server

use chrono::{TimeZone, Utc};
use dora_metrics::config::GitHubConfig;
use dora_metrics::models::RunOutcome;
use dora_metrics::providers::{
    GitHubClient, IssueQuery, IssueTracker, PipelineHistoryProvider, ProviderError, RunQuery,
};
use mockito::Matcher;

fn client_for(server: &mockito::Server) -> GitHubClient {
    let config = GitHubConfig {
        api_url: format!("{}/", server.url()),
        ..GitHubConfig::default()
    };
    GitHubClient::new(&config, "t0k3n").unwrap()
}

const RUNS_BODY: &str = r#"{
    "total_count": 3,
    "workflow_runs": [
        {
            "id": 1,
            "head_branch": "main",
            "status": "completed",
            "conclusion": "success",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:15:00Z"
        },
        {
            "id": 2,
            "head_branch": "main",
            "status": "completed",
            "conclusion": "failure",
            "created_at": "2024-05-02T10:00:00Z",
            "updated_at": "2024-05-02T10:05:00Z"
        },
        {
            "id": 3,
            "head_branch": "main",
            "status": "in_progress",
            "conclusion": null,
            "created_at": "2024-05-03T10:00:00Z",
            "updated_at": "2024-05-03T10:01:00Z"
        }
    ]
}"#;

#[tokio::test]
async fn test_list_runs_sends_branch_and_page_size() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/acme/widgets/actions/runs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("branch".into(), "main".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .match_header("authorization", "Bearer t0k3n")
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RUNS_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let runs = client
        .list_runs("acme/widgets", &RunQuery::for_branch("main", 100))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(runs.len(), 3);

    assert_eq!(runs[0].outcome, RunOutcome::Success);
    assert_eq!(runs[0].duration().unwrap().num_minutes(), 15);
    assert_eq!(runs[1].outcome, RunOutcome::Failure);

    // Unfinished runs have no completion time
    assert_eq!(runs[2].outcome, RunOutcome::Other);
    assert!(runs[2].completed_at.is_none());
    assert_eq!(runs[2].branch, "main");
}

#[tokio::test]
async fn test_list_runs_forwards_status_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/acme/widgets/actions/runs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("branch".into(), "release/1.2".into()),
            Matcher::UrlEncoded("status".into(), "success".into()),
            Matcher::UrlEncoded("per_page".into(), "25".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"total_count": 0, "workflow_runs": []}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let runs = client
        .list_runs(
            "acme/widgets",
            &RunQuery::for_branch("release/1.2", 25).with_status("success"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(runs.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/acme/widgets/actions/runs")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .list_runs("acme/widgets", &RunQuery::for_branch("main", 100))
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/repos/acme/widgets/actions/runs")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .list_runs("acme/widgets", &RunQuery::for_branch("main", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_invalid_repository_never_hits_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .list_runs("not-a-slug", &RunQuery::for_branch("main", 100))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, ProviderError::InvalidRepository(_)));
}

#[tokio::test]
async fn test_list_issues_sends_label_state_and_since() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/acme/widgets/issues")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "closed".into()),
            Matcher::UrlEncoded("labels".into(), "incident".into()),
            Matcher::UrlEncoded("since".into(), "2024-05-01T00:00:00Z".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .match_header("authorization", "Bearer t0k3n")
        .with_status(200)
        .with_body(
            r#"[
                {
                    "number": 7,
                    "created_at": "2024-05-10T08:00:00Z",
                    "closed_at": "2024-05-10T11:30:00Z",
                    "body": "Checkout broken on main",
                    "labels": [{"name": "incident"}, {"name": "sev1"}]
                },
                {
                    "number": 8,
                    "created_at": "2024-05-11T08:00:00Z",
                    "closed_at": "2024-05-11T09:00:00Z",
                    "body": null,
                    "labels": []
                }
            ]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let since = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let issues = client
        .list_issues(
            "acme/widgets",
            &IssueQuery::closed_with_label("incident", 100).since(since),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(issues.len(), 2);
    assert!(issues[0].has_label("sev1"));
    assert!(issues[0].mentions_branch("main"));
    assert_eq!(issues[0].time_to_restore().unwrap().num_minutes(), 210);
    assert_eq!(issues[1].body, "");
}

#[test]
fn test_trailing_slash_is_trimmed() {
    let config = GitHubConfig {
        api_url: "https://ghe.example.com/api/v3/".to_string(),
        ..GitHubConfig::default()
    };
    let client = GitHubClient::new(&config, "t0k3n").unwrap();
    assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
}
