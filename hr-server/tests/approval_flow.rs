mod common;

use common::{TestApp, code};
use http::StatusCode;
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn test_register_approve_login_me() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;

    let (status, body) = app
        .request(
            "POST",
            "/register",
            None,
            Some(json!({"email": "u@x.com", "password": "secret1", "fullName": "U"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration submitted for HR approval");
    let id = body["id"].as_str().unwrap().to_string();
    assert!(body.get("password").is_none());

    let (status, pending) = app.get("/pending", &hr).await;
    assert_eq!(status, StatusCode::OK);
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["status"], "pending");
    assert!(pending[0].get("password_hash").is_none());

    let (status, _) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({"email": "u@x.com", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            "PATCH",
            &format!("/user/{id}/status"),
            Some(&hr),
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, body) = app
        .request(
            "POST",
            "/login",
            None,
            Some(json!({"email": "u@x.com", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = app.get("/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], id.as_str());
    assert_eq!(me["email"], "u@x.com");
    assert_eq!(me["full_name"], "U");
    assert_eq!(me["role"], "employee");
    assert!(me.get("password").is_none());
    assert!(me.get("password_hash").is_none());
}

#[tokio::test]
async fn test_duplicate_registration_leaves_one_account() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;
    let body = json!({"email": "a@x.com", "password": "secret1", "full_name": "A"});

    let (first, _) = app.request("POST", "/register", None, Some(body.clone())).await;
    let (second, err) = app.request("POST", "/register", None, Some(body)).await;
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "User already exists");

    let (_, pending) = app.get("/pending", &hr).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            "POST",
            "/register",
            None,
            Some(json!({"email": "a@x.com", "password": "123", "full_name": "A"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "password");

    // Missing full name entirely
    let (status, body) = app
        .request(
            "POST",
            "/register",
            None,
            Some(json!({"email": "a@x.com", "password": "secret1"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), 2);
}

#[tokio::test]
async fn test_login_failure_statuses() {
    let app = TestApp::new();
    app.account(
        "ok@x.com",
        "secret1",
        Role::Employee,
        shared::models::ApprovalStatus::Approved,
    )
    .await;

    let login = |email: &'static str, password: &'static str| {
        let app = &app;
        async move {
            app.request(
                "POST",
                "/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await
        }
    };

    let (status, body) = login("nobody@x.com", "secret1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, body) = login("ok@x.com", "wrong-pass").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = login("ok@x.com", "secret1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_uniform_login_errors() {
    let app = TestApp::with_config(hr_server::Config {
        login_rate_limit: 0,
        register_rate_limit: 0,
        uniform_login_errors: true,
        ..Default::default()
    });
    app.account(
        "pending@x.com",
        "secret1",
        Role::Employee,
        shared::models::ApprovalStatus::Pending,
    )
    .await;

    for email in ["nobody@x.com", "pending@x.com"] {
        let (status, body) = app
            .request(
                "POST",
                "/login",
                None,
                Some(json!({"email": email, "password": "secret1"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_decide_rejects_pending_and_unknown_values() {
    let app = TestApp::new();
    let hr = app.token(Role::Hr).await;
    let (account, _) = app
        .account(
            "p@x.com",
            "secret1",
            Role::Employee,
            shared::models::ApprovalStatus::Pending,
        )
        .await;
    let uri = format!("/user/{}/status", account.id);

    for outcome in ["pending", "maybe"] {
        let (status, body) = app
            .request("PATCH", &uri, Some(&hr), Some(json!({"status": outcome})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid status");
    }

    let (status, _) = app
        .request(
            "PATCH",
            "/user/does-not-exist/status",
            Some(&hr),
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_me_after_account_removed() {
    let app = TestApp::new();
    // Token for an account that was never stored
    let identity = hr_server::Identity {
        account_id: "gone".into(),
        email: "gone@x.com".into(),
        role: Role::Employee,
        name: "Gone".into(),
    };
    let token = app.state.tokens.issue(&identity).unwrap();
    let (status, _) = app.get("/me", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_rate_limit() {
    let app = TestApp::with_config(hr_server::Config {
        login_rate_limit: 0,
        register_rate_limit: 2,
        ..Default::default()
    });

    for i in 0..2 {
        let (status, _) = app
            .request(
                "POST",
                "/register",
                None,
                Some(json!({"email": format!("r{i}@x.com"), "password": "secret1", "full_name": "R"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = app
        .request(
            "POST",
            "/register",
            None,
            Some(json!({"email": "r9@x.com", "password": "secret1", "full_name": "R"})),
        )
        .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(code(&body), 6);
}
