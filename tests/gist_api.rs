//! GistClient against a local GitHub API mock.

use std::sync::atomic::Ordering;

use functions_client::secrets::{GistClient, GistStore};
use functions_client::FunctionsError;

mod common;

#[tokio::test]
async fn test_create_gist_returns_raw_url() {
    let github = common::start_mock_github(Some("gist, repo")).await;
    let client = GistClient::new(&github.config, "ghp_test").unwrap();

    let url = client.create_gist(r#"{"encryptedSecrets":"0x01"}"#).await.unwrap();
    assert_eq!(url, "https://gist.github.com/alice/abc123/raw");

    assert_eq!(
        github.state.authorization.lock().unwrap().as_deref(),
        Some("Bearer ghp_test")
    );

    let created = github.state.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["public"], false);
    let files = created[0]["files"].as_object().unwrap();
    assert_eq!(files.len(), 1);
    let (name, file) = files.iter().next().unwrap();
    assert!(name.starts_with("encrypted-functions-request-data-"));
    assert!(name.ends_with(".json"));
    assert_eq!(file["content"], r#"{"encryptedSecrets":"0x01"}"#);
}

#[tokio::test]
async fn test_fine_grained_token_without_scope_header() {
    let github = common::start_mock_github(None).await;
    let client = GistClient::new(&github.config, "github_pat_test").unwrap();

    assert!(client.create_gist("{}").await.is_ok());
}

#[tokio::test]
async fn test_token_without_gist_scope_is_rejected() {
    let github = common::start_mock_github(Some("repo, read:user")).await;
    let client = GistClient::new(&github.config, "ghp_test").unwrap();

    let err = client.create_gist("{}").await.unwrap_err();
    match err {
        FunctionsError::UpstreamApi { service, message, .. } => {
            assert_eq!(service, "GitHub");
            assert!(message.contains("permission to create gists"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(github.state.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_error_keeps_payload() {
    let github = common::start_mock_github(Some("gist")).await;
    github.state.fail_create.store(true, Ordering::SeqCst);
    let client = GistClient::new(&github.config, "ghp_test").unwrap();

    let err = client.create_gist("{}").await.unwrap_err();
    match err {
        FunctionsError::UpstreamApi { status, payload, .. } => {
            assert_eq!(status, Some(422));
            assert!(payload.contains("Validation Failed"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_gist() {
    let github = common::start_mock_github(Some("gist")).await;
    let client = GistClient::new(&github.config, "ghp_test").unwrap();

    assert!(client
        .delete_gist("https://gist.github.com/alice/abc123/raw")
        .await
        .unwrap());
    assert_eq!(*github.state.deleted.lock().unwrap(), vec!["abc123".to_string()]);

    // Unknown gists are refused, not fatal.
    assert!(!client
        .delete_gist("https://gist.github.com/alice/fff999")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_rejects_foreign_url() {
    let github = common::start_mock_github(Some("gist")).await;
    let client = GistClient::new(&github.config, "ghp_test").unwrap();

    let err = client
        .delete_gist("https://example.com/alice/abc123")
        .await
        .unwrap_err();
    assert!(matches!(err, FunctionsError::InvalidGistUrl(_)));
    assert!(github.state.deleted.lock().unwrap().is_empty());
}
