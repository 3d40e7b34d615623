#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use skadi::modules::auth::AuthService;
use skadi::router::init_router;
use skadi::state::AppState;
use skadi_auth::UserRole;
use skadi_cache::MemoryBlacklist;
use skadi_config::{CookieConfig, CorsConfig, JwtConfig};
use skadi_core::hash_password_with_cost;
use skadi_db::{RepositoryError, UserRepository};
use skadi_models::{CredentialRecord, NewUser};

pub const PASSWORD: &str = "correct-horse-9";

/// Credential store backed by a map; ids are assigned in insertion order.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<String, CredentialRecord>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<CredentialRecord, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.username) {
            return Err(RepositoryError::Duplicate);
        }
        let record = CredentialRecord {
            id: users.len() as i64 + 1,
            username: user.username.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.insert(user.username, record.clone());
        Ok(record)
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "access-secret-for-tests".into(),
        refresh_secret: "refresh-secret-for-tests".into(),
        access_ttl: Duration::from_secs(300),
        refresh_ttl: Duration::from_secs(864_000),
    }
}

pub struct TestApp {
    pub router: Router,
    pub blacklist: Arc<MemoryBlacklist>,
    pub users: Arc<InMemoryUsers>,
}

/// App with one user per role (`admin`, `teacher`, `student`, all with
/// [`PASSWORD`]) and the example routes mounted.
pub async fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUsers::default());
    let hash = hash_password_with_cost(PASSWORD.as_bytes(), 4).unwrap();
    for role in UserRole::ALL {
        users
            .create_user(NewUser {
                username: role.as_str().to_string(),
                password_hash: hash.clone(),
                role,
            })
            .await
            .unwrap();
    }

    let blacklist = Arc::new(MemoryBlacklist::default());
    let auth = AuthService::new(users.clone(), blacklist.clone(), &jwt_config());
    let cors = CorsConfig {
        allowed_origins: vec!["http://localhost:5173".into()],
        allow_credentials: true,
    };
    let state = AppState::new(auth, CookieConfig::default(), cors).with_debug(true);

    TestApp {
        router: init_router(state),
        blacklist,
        users,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(
            Request::post("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Logs in and returns `(access_token, refresh_token)`.
    pub async fn tokens(&self, username: &str) -> (String, String) {
        let response = self.login(username, PASSWORD).await;
        assert_eq!(response.status(), 200);
        let refresh = refresh_cookie_value(&response).expect("refresh cookie");
        let body = json_body(response).await;
        (body["access_token"].as_str().unwrap().to_string(), refresh)
    }

    pub async fn get_with_bearer(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn get_with_refresh(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .header(header::COOKIE, format!("refresh={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("refresh="))
        .map(str::to_string)
}

pub fn refresh_cookie_value(response: &Response<Body>) -> Option<String> {
    set_cookie(response).and_then(|cookie| {
        cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix("refresh="))
            .map(str::to_string)
    })
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
