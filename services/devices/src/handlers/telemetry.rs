use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use iothub_auth_types::bearer::BearerIdentity;

use crate::error::DevicesServiceError;
use crate::handlers::{DeviceResponse, ReadingResponse};
use crate::state::AppState;
use crate::usecase::telemetry::{
    HistoryInput, HistoryUseCase, RecordReadingInput, RecordReadingUseCase,
};

// ── POST /devices/{id}/data ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RecordReadingBody {
    pub value: f64,
}

pub async fn record_reading(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(device_id): Path<Uuid>,
    Json(body): Json<RecordReadingBody>,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = RecordReadingUseCase {
        devices: state.device_repo(),
        telemetry: state.telemetry_repo(),
    };
    // Responds with the updated device so the caller sees the refreshed
    // projection without a second request.
    let device = usecase
        .execute(
            identity.user_id,
            RecordReadingInput {
                device_id,
                value: body.value,
            },
        )
        .await?;
    Ok(Json(DeviceResponse::from(device)))
}

// ── GET /devices/{id}/history ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub hours: Option<i64>,
}

pub async fn history(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(device_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = HistoryUseCase {
        devices: state.device_repo(),
        telemetry: state.telemetry_repo(),
    };
    let readings = usecase
        .execute(
            identity.user_id,
            HistoryInput {
                device_id,
                hours: query.hours,
            },
        )
        .await?;
    Ok(Json(
        readings
            .into_iter()
            .map(ReadingResponse::from)
            .collect::<Vec<_>>(),
    ))
}
