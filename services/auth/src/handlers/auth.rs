use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use iothub_auth_types::bearer::BearerIdentity;

use crate::error::AuthServiceError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::otp::{ResendOtpInput, ResendOtpUseCase};
use crate::usecase::password::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};
use crate::usecase::profile::GetProfileUseCase;
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::token::{LoginInput, LoginUseCase, VerifyOtpInput, VerifyOtpUseCase};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterBody {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(RegisterInput {
            full_name: body.full_name,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/verify-otp ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpBody {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub access_token_exp: u64,
    pub user: UserResponse,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase
        .execute(VerifyOtpInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(SessionResponse {
        access_token: session.access_token,
        access_token_exp: session.access_token_exp,
        user: session.user.into(),
    }))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(SessionResponse {
        access_token: session.access_token,
        access_token_exp: session.access_token_exp,
        user: session.user.into(),
    }))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordBody {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(ForgotPasswordInput { email: body.email })
        .await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/reset-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordBody {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::OK)
}

// ── POST /auth/resend-otp ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResendOtpBody {
    pub email: String,
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(body): Json<ResendOtpBody>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = ResendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase
        .execute(ResendOtpInput { email: body.email })
        .await?;
    Ok(StatusCode::OK)
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    identity: BearerIdentity,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = GetProfileUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}
