use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use iothub_core::health::{healthz, readyz};
use iothub_core::middleware::request_id_layer;

use crate::handlers::{auth, user};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState>))
        .route("/auth/register", post(auth::register))
        .route("/auth/verify-otp", post(auth::verify_otp))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/resend-otp", post(auth::resend_otp))
        .route("/auth/me", get(auth::me))
        .route(
            "/users/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/users/change-password", post(user::change_password))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
