use serde_json::{Value, json};

use common::ProfileDocument;
use common::platform::memory::{Call, MemoryPlatform};

use crate::common::{TestApp, assert_cors, routes};

fn blocked(user_id: &str) -> Value {
    json!({
        "events": [
            format!("users.{user_id}.update.status"),
            "users.*.update.status",
            "users.*"
        ],
        "data": {"$id": user_id, "status": false, "email": "someone@example.com"}
    })
}

fn populated() -> MemoryPlatform {
    let profile: ProfileDocument = serde_json::from_value(json!({
        "$id": "p1",
        "userId": "u1",
        "profilePicFileId": "pic",
        "additionalPhotos": "[\"a\",\"b\"]"
    }))
    .unwrap();

    MemoryPlatform::new()
        .with_blocked_account("u1")
        .with_profile(profile)
        .with_files(["pic", "a", "b"])
}

mod preflight {
    use super::*;

    #[tokio::test]
    async fn options_returns_empty_object() {
        let app = TestApp::spawn(populated()).await;

        let res = app.options(routes::USER_EVENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({}));
        assert_cors(&res);
        assert!(app.platform.calls().is_empty());
    }
}

mod skips {
    use super::*;

    #[tokio::test]
    async fn empty_body_is_skipped_as_no_events() {
        let app = TestApp::spawn(populated()).await;

        let res = app.post_without_token(routes::USER_EVENTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "no events");
        assert!(res.header("content-type").unwrap().starts_with("text/plain"));
        assert_cors(&res);
        assert!(app.platform.calls().is_empty());
    }

    #[tokio::test]
    async fn unrelated_events_are_skipped() {
        let app = TestApp::spawn(populated()).await;

        let res = app
            .post_json(
                routes::USER_EVENTS,
                &json!({
                    "events": ["users.u1.sessions.s1.create", "databases.main.create"],
                    "data": {"$id": "u1", "status": false}
                }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "no matching events");
        assert!(app.platform.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_user_id_is_skipped() {
        let app = TestApp::spawn(populated()).await;

        let res = app
            .post_json(
                routes::USER_EVENTS,
                &json!({"events": ["users.u1.update.status"], "data": {"status": false}}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "no user id");
    }

    #[tokio::test]
    async fn reactivation_is_skipped() {
        let app = TestApp::spawn(populated()).await;
        let mut body = blocked("u1");
        body["data"]["status"] = json!(true);

        let res = app.post_json(routes::USER_EVENTS, &body).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "not blocked");
        assert_eq!(app.platform.account_status("u1"), Some(false));
        assert!(app.platform.calls().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_handler_is_skipped_with_configuration_error() {
        let app = TestApp::spawn_unconfigured("files_bucket_id").await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "Configuration error");
    }
}

mod cascade {
    use super::*;

    #[tokio::test]
    async fn blocked_account_is_cleaned_up() {
        let app = TestApp::spawn(populated()).await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["message"], "User data cleaned up successfully");
        assert_eq!(res.body["userId"], "u1");
        assert!(res.body.get("failures").is_none());
        assert_cors(&res);

        assert!(!app.platform.has_file("pic"));
        assert!(!app.platform.has_file("a"));
        assert!(!app.platform.has_file("b"));
        assert!(!app.platform.has_profile("p1"));
        assert_eq!(app.platform.account_status("u1"), None);
        assert_eq!(
            app.platform.calls().last(),
            Some(&Call::DeleteAccount("u1".into()))
        );
    }

    #[tokio::test]
    async fn account_without_profile_is_still_deleted() {
        let app = TestApp::spawn(MemoryPlatform::new().with_blocked_account("u1")).await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "User deleted, no profile found");
        assert_eq!(app.platform.account_status("u1"), None);
    }

    #[tokio::test]
    async fn failed_steps_are_listed_without_failing_the_request() {
        let app = TestApp::spawn(
            populated().failing(Call::DeleteFile("a".into()), "storage unavailable"),
        )
        .await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
        let failures = res.body["failures"].as_array().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0]["step"], "delete_file");
        assert_eq!(failures[0]["target"], "a");
        assert!(failures[0]["error"].as_str().unwrap().contains("storage unavailable"));
        assert_eq!(app.platform.account_status("u1"), None);
    }

    #[tokio::test]
    async fn redelivered_event_succeeds_again() {
        let app = TestApp::spawn(populated()).await;

        let first = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;
        let second = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 200);
        assert_eq!(second.body["success"], true);
        assert!(second.body.get("failures").is_none());
    }

    #[tokio::test]
    async fn profile_lookup_failure_is_a_server_error() {
        let app = TestApp::spawn(populated().failing(Call::FindProfiles("u1".into()), "db down"))
            .await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("u1")).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["error"], "Failed to clean up user data");
        assert!(res.body["details"].as_str().unwrap().contains("db down"));
        assert_eq!(app.platform.account_status("u1"), Some(false));
    }

    #[tokio::test]
    async fn forged_delivery_leaves_an_active_account_in_place() {
        let app = TestApp::spawn(MemoryPlatform::new().with_account("victim")).await;

        let res = app.post_json(routes::USER_EVENTS, &blocked("victim")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "account is active");
        assert_eq!(app.platform.account_status("victim"), Some(true));
        assert_eq!(app.platform.calls(), vec![Call::AccountStatus("victim".into())]);
    }

    #[tokio::test]
    async fn malformed_json_is_a_server_error() {
        let app = TestApp::spawn(populated()).await;

        let res = app.post_raw(routes::USER_EVENTS, "{\"events\": [").await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["error"], "Failed to clean up user data");
        assert!(res.body["details"].is_string());
        assert_cors(&res);
        assert!(app.platform.calls().is_empty());
    }
}
