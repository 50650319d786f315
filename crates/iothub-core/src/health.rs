use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Gives the readiness probe access to the service's database handle.
/// Implemented by each service's `AppState`.
pub trait DbSource {
    fn db(&self) -> &DatabaseConnection;
}

/// Handler for `GET /healthz` — liveness check, 200 while the process
/// serves requests.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. Pings the database so a
/// service with a dead pool drops out of rotation. Register with the state
/// type spelled out: `get(readyz::<AppState>)`.
pub async fn readyz<S: DbSource>(State(state): State<S>) -> StatusCode {
    match state.db().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
