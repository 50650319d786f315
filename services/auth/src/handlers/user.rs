use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use iothub_auth_types::bearer::BearerIdentity;

use crate::error::AuthServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::password::{ChangePasswordInput, ChangePasswordUseCase};
use crate::usecase::profile::{GetProfileUseCase, UpdateProfileInput, UpdateProfileUseCase};

// ── GET /users/profile ───────────────────────────────────────────────────────

pub async fn get_profile(
    State(state): State<AppState>,
    identity: BearerIdentity,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

// ── PUT /users/profile ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileBody {
    pub full_name: String,
}

pub async fn update_profile(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(body): Json<UpdateProfileBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateProfileInput {
                full_name: body.full_name,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(user)))
}

// ── POST /users/change-password ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    identity: BearerIdentity,
    Json(body): Json<ChangePasswordBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::OK)
}
