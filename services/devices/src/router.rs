use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use iothub_core::health::{healthz, readyz};
use iothub_core::middleware::request_id_layer;

use crate::handlers::{device, telemetry};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState>))
        .route(
            "/devices",
            get(device::list_devices).post(device::create_device),
        )
        .route(
            "/devices/{id}",
            get(device::get_device).put(device::update_device),
        )
        .route("/devices/{id}/data", post(telemetry::record_reading))
        .route("/devices/{id}/history", get(telemetry::history))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
