pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{self, handlers as auth_handlers};
use crate::intake::handlers as intake_handlers;
use crate::review::handlers as review_handlers;
use crate::state::AppState;

/// Portfolio submissions carry a resume plus several images; the default
/// 2 MB body cap is far too small for them.
const MAX_SUBMISSION_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Everything that reads or mutates records goes through the gate.
    let review = Router::new()
        .route(
            "/api/v1/admin/applications",
            get(review_handlers::handle_list),
        )
        .route(
            "/api/v1/admin/applications/:id",
            get(review_handlers::handle_detail).patch(review_handlers::handle_review_update),
        )
        .route("/api/v1/auth/me", get(auth_handlers::handle_me))
        .route("/api/v1/auth/logout", post(auth_handlers::handle_logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_evaluator,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/applications", post(intake_handlers::handle_submit))
        .route("/api/v1/auth/signup", post(auth_handlers::handle_signup))
        .route("/api/v1/auth/login", post(auth_handlers::handle_login))
        .merge(review)
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
        .with_state(state)
}
