use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{log_in, log_out, obtain_access};
use crate::middleware::auth::require_refresh;
use crate::state::AppState;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let private = Router::new()
        .route("/obtain", get(obtain_access))
        .route("/logout", get(log_out))
        .route_layer(middleware::from_fn_with_state(state, require_refresh));

    Router::new()
        .route("/login", post(log_in))
        .nest("/private", private)
}
