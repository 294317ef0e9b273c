//! In-process test harness: the full router over the in-memory store.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use hr_server::db::{AccountStore, NewAccount};
use hr_server::util::hash_password;
use hr_server::{AppState, Config, Identity, Stores, build_app};
use serde_json::Value;
use shared::models::{Account, AccountProfile, ApprovalStatus, Role};
use tower::ServiceExt;

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// Rate limits off; every oneshot request shares the "unknown" client IP.
    pub fn new() -> Self {
        Self::with_config(Config {
            login_rate_limit: 0,
            register_rate_limit: 0,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(Stores::memory(), config);
        let router = build_app(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a prebuilt request and decode the JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(token), None).await
    }

    /// Insert an account directly into the store and sign a token for it.
    pub async fn account(&self, email: &str, password: &str, role: Role, status: ApprovalStatus) -> (Account, String) {
        let account = Account {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: format!("{role} user"),
            role,
            status,
            profile: AccountProfile::default(),
            created_at: shared::util::now_millis(),
        };
        let account = self
            .state
            .stores
            .accounts
            .insert(NewAccount {
                account,
                password_hash: hash_password(password).unwrap(),
            })
            .await
            .unwrap();
        let token = self.state.tokens.issue(&Identity::from(&account)).unwrap();
        (account, token)
    }

    /// Token for an approved account of `role`
    pub async fn token(&self, role: Role) -> String {
        let email = format!("{}-{}@x.com", role, uuid::Uuid::new_v4());
        self.account(&email, "secret1", role, ApprovalStatus::Approved)
            .await
            .1
    }
}

pub fn code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
