use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Router, middleware, routing::get};
use tower::ServiceExt;

use skadi::middleware::auth::AuthUser;
use skadi::middleware::role::{require_admin, require_student, require_teacher};
use skadi_auth::{UserClaims, UserRole};

async fn ok() -> &'static str {
    "ok"
}

async fn whoami(AuthUser(claims): AuthUser) -> String {
    claims.id.to_string()
}

/// Routes guarded by role checks but with the identity injected directly,
/// standing in for `require_access`.
fn app(identity: Option<UserClaims>) -> Router {
    let router = Router::new()
        .merge(
            Router::new()
                .route("/admin", get(ok))
                .route_layer(middleware::from_fn(require_admin)),
        )
        .merge(
            Router::new()
                .route("/teacher", get(ok))
                .route_layer(middleware::from_fn(require_teacher)),
        )
        .merge(
            Router::new()
                .route("/student", get(ok))
                .route_layer(middleware::from_fn(require_student)),
        )
        .route("/whoami", get(whoami));

    match identity {
        Some(claims) => router.layer(axum::Extension(AuthUser(claims))),
        None => router,
    }
}

async fn status(router: Router, uri: &str) -> StatusCode {
    router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_matching_role_passes() {
    for role in UserRole::ALL {
        let router = app(Some(UserClaims { id: 7, role }));
        assert_eq!(status(router, &format!("/{role}")).await, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_other_roles_are_forbidden() {
    let router = app(Some(UserClaims {
        id: 7,
        role: UserRole::Teacher,
    }));

    assert_eq!(status(router.clone(), "/admin").await, StatusCode::FORBIDDEN);
    assert_eq!(status(router, "/student").await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_identity_fails_closed() {
    for uri in ["/admin", "/teacher", "/student", "/whoami"] {
        assert_eq!(status(app(None), uri).await, StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_extractor_reads_injected_identity() {
    let router = app(Some(UserClaims {
        id: 42,
        role: UserRole::Student,
    }));
    let response = router
        .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(&body[..], b"42");
}
