use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use iothub_auth_types::bearer::BearerIdentity;

use crate::error::DevicesServiceError;
use crate::handlers::DeviceResponse;
use crate::state::AppState;
use crate::usecase::device::{
    CreateDeviceInput, CreateDeviceUseCase, GetDeviceUseCase, ListDevicesUseCase,
    UpdateDeviceInput, UpdateDeviceUseCase,
};

// ── POST /devices ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateDeviceBody {
    pub name: String,
    pub kind: String,
    pub location: String,
    pub unit: String,
}

pub async fn create_device(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(body): Json<CreateDeviceBody>,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = CreateDeviceUseCase {
        devices: state.device_repo(),
    };
    let device = usecase
        .execute(
            identity.user_id,
            CreateDeviceInput {
                name: body.name,
                kind: body.kind,
                location: body.location,
                unit: body.unit,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DeviceResponse::from(device))))
}

// ── GET /devices ─────────────────────────────────────────────────────────────

pub async fn list_devices(
    State(state): State<AppState>,
    identity: BearerIdentity,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = ListDevicesUseCase {
        devices: state.device_repo(),
    };
    let devices = usecase.execute(identity.user_id).await?;
    Ok(Json(
        devices
            .into_iter()
            .map(DeviceResponse::from)
            .collect::<Vec<_>>(),
    ))
}

// ── PUT /devices/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateDeviceBody {
    pub name: String,
    pub location: String,
    pub unit: String,
}

pub async fn update_device(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(device_id): Path<Uuid>,
    Json(body): Json<UpdateDeviceBody>,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = UpdateDeviceUseCase {
        devices: state.device_repo(),
    };
    let device = usecase
        .execute(
            identity.user_id,
            device_id,
            UpdateDeviceInput {
                name: body.name,
                location: body.location,
                unit: body.unit,
            },
        )
        .await?;
    Ok(Json(DeviceResponse::from(device)))
}

// ── GET /devices/{id} ────────────────────────────────────────────────────────

pub async fn get_device(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Path(device_id): Path<Uuid>,
) -> Result<impl IntoResponse, DevicesServiceError> {
    let usecase = GetDeviceUseCase {
        devices: state.device_repo(),
    };
    let device = usecase.execute(identity.user_id, device_id).await?;
    Ok(Json(DeviceResponse::from(device)))
}
