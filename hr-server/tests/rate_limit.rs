mod common;

use axum::body::Body;
use common::{TestApp, code};
use http::{Request, StatusCode, header};
use hr_server::Config;
use serde_json::json;

fn login_from(forwarded: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", forwarded)
        .body(Body::from(
            json!({"email": "nobody@x.com", "password": "secret1"}).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_rotating_forwarded_header_still_limited() {
    let app = TestApp::with_config(Config {
        login_rate_limit: 2,
        register_rate_limit: 0,
        ..Config::default()
    });

    let mut statuses = Vec::new();
    for i in 0..10 {
        let (status, body) = app.send(login_from(&format!("10.9.9.{i}"))).await;
        if status == StatusCode::TOO_MANY_REQUESTS {
            assert_eq!(code(&body), 6);
        }
        statuses.push(status);
    }

    assert_eq!(&statuses[..2], &[StatusCode::NOT_FOUND, StatusCode::NOT_FOUND]);
    assert!(
        statuses[2..]
            .iter()
            .all(|status| *status == StatusCode::TOO_MANY_REQUESTS),
        "{statuses:?}"
    );
}

#[tokio::test]
async fn test_forwarded_header_honoured_when_trusted() {
    let app = TestApp::with_config(Config {
        login_rate_limit: 2,
        register_rate_limit: 0,
        trust_proxy_headers: true,
        ..Config::default()
    });

    for i in 0..5 {
        let (status, _) = app.send(login_from(&format!("10.9.9.{i}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    app.send(login_from("10.9.9.0")).await;
    let (status, _) = app.send(login_from("10.9.9.0")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}
