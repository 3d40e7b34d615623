use axum::{Router, middleware, routing::get};

use super::controller::{admin, free, private, student, teacher};
use crate::middleware::auth::require_access;
use crate::middleware::role::{require_admin, require_student, require_teacher};
use crate::state::AppState;

pub fn init_example_router(state: AppState) -> Router<AppState> {
    let by_role = Router::new()
        .merge(
            Router::new()
                .route("/admin", get(admin))
                .route_layer(middleware::from_fn(require_admin)),
        )
        .merge(
            Router::new()
                .route("/teacher", get(teacher))
                .route_layer(middleware::from_fn(require_teacher)),
        )
        .merge(
            Router::new()
                .route("/student", get(student))
                .route_layer(middleware::from_fn(require_student)),
        );

    let authenticated = Router::new()
        .route("/private", get(private))
        .merge(by_role)
        .route_layer(middleware::from_fn_with_state(state, require_access));

    Router::new()
        .route("/free", get(free))
        .merge(authenticated)
}
