use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password too short")]
    InvalidPassword,
    /// Covers no pending challenge, expired challenge, code mismatch, and a
    /// challenge superseded by re-issuance. One variant on purpose — the
    /// caller must not learn which check failed.
    #[error("invalid or expired otp")]
    InvalidOtp,
    #[error("invalid credentials")]
    InvalidCredential,
    #[error("email not verified")]
    NotVerified,
    #[error("invalid token")]
    InvalidToken,
    #[error("failed to deliver otp email")]
    DeliveryFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::NotVerified => "NOT_VERIFIED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::DeliveryFailed => "DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidEmail | Self::InvalidPassword | Self::InvalidOtp => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredential | Self::NotVerified | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::DeliveryFailed => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
