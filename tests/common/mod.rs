#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rsvp::router::init_router;
use rsvp::state::AppState;
use rsvp::store::{IdentityStore, MemoryIdentityStore};
use rsvp_config::{CorsConfig, JwtConfig, ServerConfig, SignupConfig};
use rsvp_models::Role;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const INVITE_CODE: &str = "open-sesame";
pub const JWT_SECRET: &str = "integration-test-secret";
pub const STRONG_PASSWORD: &str = "ASdf12#$";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryIdentityStore>,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct SignedUp {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryIdentityStore::new());
        let mut signup_config = SignupConfig::new(INVITE_CODE);
        signup_config.hash_cost = 4;

        let state = AppState::new(
            store.clone(),
            &JwtConfig::new(JWT_SECRET),
            signup_config,
            CorsConfig::default(),
            ServerConfig::default(),
        );

        Self {
            router: init_router(state.clone()),
            store,
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let authorization = token.map(|token| format!("Bearer {token}"));
        self.request_with_authorization(method, uri, authorization.as_deref(), body)
            .await
    }

    /// Like [`Self::request`], with the `Authorization` header value given verbatim.
    pub async fn request_with_authorization(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, body }
    }

    pub async fn signup(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/signup",
            None,
            Some(signup_body(email, password, INVITE_CODE)),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Signs up with a strong password and returns the new identity's tokens.
    pub async fn signed_up(&self, email: &str) -> SignedUp {
        let response = self.signup(email, STRONG_PASSWORD).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        let identity = self
            .store
            .find_by_email(email)
            .await
            .unwrap()
            .expect("identity was just created");

        SignedUp {
            id: identity.id,
            email: identity.email,
            token: response.body["token"].as_str().unwrap().to_string(),
            refresh_token: response.body["refreshToken"].as_str().unwrap().to_string(),
        }
    }

    /// Signs up, then promotes directly in the store as the CLI would.
    pub async fn signed_up_admin(&self, email: &str) -> SignedUp {
        let user = self.signed_up(email).await;
        self.store.update_role(user.id, Role::Admin).await.unwrap();
        user
    }
}

pub fn signup_body(email: &str, password: &str, invite_code: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "inviteCode": invite_code,
    })
}
