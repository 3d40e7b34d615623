use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use skadi_auth::UserClaims;

use crate::middleware::auth::AuthUser;

/// Echo returned by the role-check routes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExampleResponse {
    pub handler: String,
    pub access: String,
    pub claims: Option<UserClaims>,
}

impl ExampleResponse {
    fn new(handler: &str, access: &str, claims: Option<UserClaims>) -> Json<Self> {
        Json(Self {
            handler: handler.to_string(),
            access: access.to_string(),
            claims,
        })
    }
}

pub async fn free() -> Json<ExampleResponse> {
    ExampleResponse::new("free", "anyone", None)
}

pub async fn private(AuthUser(claims): AuthUser) -> Json<ExampleResponse> {
    ExampleResponse::new("private", "any authenticated user", Some(claims))
}

pub async fn admin(AuthUser(claims): AuthUser) -> Json<ExampleResponse> {
    ExampleResponse::new("admin", "admin", Some(claims))
}

pub async fn teacher(AuthUser(claims): AuthUser) -> Json<ExampleResponse> {
    ExampleResponse::new("teacher", "teacher", Some(claims))
}

pub async fn student(AuthUser(claims): AuthUser) -> Json<ExampleResponse> {
    ExampleResponse::new("student", "student", Some(claims))
}
