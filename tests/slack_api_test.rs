//! HTTP-level tests for the Slack client and the Google Slides editor,
//! against a local mock server.

use std::sync::Arc;

use httpmock::prelude::*;

use slidecard::auth::AuthStorage;
use slidecard::auth::storage::Credential;
use slidecard::config::Settings;
use slidecard::error::Error;
use slidecard::slack::http::SlackClient;
use slidecard::slack::{Authorization, IdentityClient};
use slidecard::slides::google::GoogleSlidesEditor;
use slidecard::slides::{DocumentEditor, Substitution};

fn settings() -> Settings {
    Settings {
        client_id: Some("123.456".to_string()),
        client_secret: Some("shhh".to_string()),
        template_slide_id: Some("template-1".to_string()),
        google_token: Some("ya29.test".to_string()),
        redirect_uri: "https://localhost/slidecard/callback".to_string(),
    }
}

fn client_for(server: &MockServer) -> SlackClient {
    let storage = Arc::new(AuthStorage::open(":memory:").unwrap());
    SlackClient::new(storage, settings()).with_base_url(server.base_url())
}

// ── Slack client ──────────────────────────────────────────────────

#[tokio::test]
async fn user_profile_parses_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users.profile.get")
            .header("authorization", "Bearer xoxp-test");
        then.status(200).json_body(serde_json::json!({
            "ok": true,
            "profile": {
                "display_name": "ada",
                "real_name": "Ada Lovelace",
                "title": "Analyst",
                "image_512": "https://img.example/512.png",
                "image_192": "https://img.example/192.png",
                "image_72": "https://img.example/72.png",
                "fields": {
                    "Xf01": {"value": "she/her", "alt": ""}
                }
            }
        }));
    });

    let client = client_for(&server);
    let profile = client.user_profile("xoxp-test").await.unwrap();

    mock.assert();
    assert_eq!(profile.display_name, "ada");
    assert_eq!(profile.image_512, "https://img.example/512.png");
    assert_eq!(profile.field_value("Xf01"), Some("she/her"));
}

#[tokio::test]
async fn team_profile_preserves_schema_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/team.profile.get");
        then.status(200).json_body(serde_json::json!({
            "ok": true,
            "profile": {
                "fields": [
                    {"id": "Xf02", "label": "Favorite food"},
                    {"id": "Xf01", "label": "Pronouns"}
                ]
            }
        }));
    });

    let client = client_for(&server);
    let schema = client.team_profile("xoxp-test").await.unwrap();

    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.fields[0].label, "Favorite food");
    assert_eq!(schema.fields[1].label, "Pronouns");
}

#[tokio::test]
async fn invalid_auth_maps_to_auth_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users.profile.get");
        then.status(200)
            .json_body(serde_json::json!({"ok": false, "error": "invalid_auth"}));
    });

    let client = client_for(&server);
    let err = client.user_profile("xoxp-bad").await.unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
    assert!(err.to_string().contains("invalid_auth"));
}

#[tokio::test]
async fn other_api_errors_map_to_upstream_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users.profile.get");
        then.status(200)
            .json_body(serde_json::json!({"ok": false, "error": "ratelimited"}));
    });

    let client = client_for(&server);
    let err = client.user_profile("xoxp-test").await.unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
    assert!(err.to_string().contains("ratelimited"));
}

#[tokio::test]
async fn http_failure_maps_to_upstream() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users.profile.get");
        then.status(500).body("internal error");
    });

    let client = client_for(&server);
    let err = client.user_profile("xoxp-test").await.unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn check_authorization_without_token_returns_url() {
    let server = MockServer::start();
    let client = client_for(&server);

    match client.check_authorization().await.unwrap() {
        Authorization::Unauthorized { authorization_url } => {
            assert!(authorization_url.starts_with("https://slack.com/oauth/authorize?"));
            assert!(authorization_url.contains("client_id=123.456"));
        }
        Authorization::Authorized { .. } => panic!("expected Unauthorized"),
    }
}

#[tokio::test]
async fn check_authorization_with_stored_token() {
    let server = MockServer::start();
    let storage = Arc::new(AuthStorage::open(":memory:").unwrap());
    storage
        .set(
            "slack",
            Credential::Token {
                access: "xoxp-stored".to_string(),
            },
        )
        .unwrap();
    let client = SlackClient::new(storage, settings()).with_base_url(server.base_url());

    match client.check_authorization().await.unwrap() {
        Authorization::Authorized { token } => assert_eq!(token, "xoxp-stored"),
        Authorization::Unauthorized { .. } => panic!("expected Authorized"),
    }
}

#[tokio::test]
async fn revoke_session_clears_stored_token() {
    let server = MockServer::start();
    let storage = Arc::new(AuthStorage::open(":memory:").unwrap());
    storage
        .set(
            "slack",
            Credential::Token {
                access: "xoxp-stored".to_string(),
            },
        )
        .unwrap();
    let client = SlackClient::new(storage.clone(), settings()).with_base_url(server.base_url());

    client.revoke_session().await.unwrap();
    assert!(storage.get("slack").unwrap().is_none());

    // Idempotent
    client.revoke_session().await.unwrap();
}

// ── Google Slides editor ──────────────────────────────────────────

#[tokio::test]
async fn duplicate_copies_the_template() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/files/template-1/copy")
            .header("authorization", "Bearer ya29.test");
        then.status(200)
            .json_body(serde_json::json!({"id": "fresh-copy-1"}));
    });

    let editor = GoogleSlidesEditor::new(Some("ya29.test".to_string()))
        .with_base_urls(server.base_url(), server.base_url());
    let artifact = editor.duplicate("template-1").await.unwrap();

    mock.assert();
    assert_eq!(artifact.id, "fresh-copy-1");
    assert_eq!(
        artifact.url,
        "https://docs.google.com/presentation/d/fresh-copy-1/edit"
    );
}

#[tokio::test]
async fn batch_update_sends_replace_requests() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/presentations/fresh-copy-1:batchUpdate")
            .body_contains("replaceAllText")
            .body_contains("replaceAllShapesWithImage")
            .body_contains("{{name}}");
        then.status(200).json_body(serde_json::json!({"replies": []}));
    });

    let editor = GoogleSlidesEditor::new(Some("ya29.test".to_string()))
        .with_base_urls(server.base_url(), server.base_url());

    let batch = vec![
        Substitution::ReplaceText {
            placeholder: "{{name}}".to_string(),
            text: "ada".to_string(),
        },
        Substitution::ReplaceImage {
            placeholder: "{{image}}".to_string(),
            image_url: "https://img.example/512.png".to_string(),
        },
    ];
    editor.batch_update("fresh-copy-1", &batch).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn drive_error_surfaces_as_upstream() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/files/template-1/copy");
        then.status(403).body("insufficient permissions");
    });

    let editor = GoogleSlidesEditor::new(Some("ya29.test".to_string()))
        .with_base_urls(server.base_url(), server.base_url());
    let err = editor.duplicate("template-1").await.unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
    assert!(err.to_string().contains("insufficient permissions"));
}

#[tokio::test]
async fn batch_error_surfaces_as_upstream() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/presentations/doc-1:batchUpdate");
        then.status(400).body("invalid request");
    });

    let editor = GoogleSlidesEditor::new(Some("ya29.test".to_string()))
        .with_base_urls(server.base_url(), server.base_url());
    let err = editor
        .batch_update(
            "doc-1",
            &[Substitution::ReplaceText {
                placeholder: "{{name}}".to_string(),
                text: "ada".to_string(),
            }],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { .. }));
}
