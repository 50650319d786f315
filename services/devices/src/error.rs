use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Devices service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum DevicesServiceError {
    /// Also returned when the device exists but belongs to another identity;
    /// callers cannot enumerate other people's device ids.
    #[error("device not found")]
    DeviceNotFound,
    #[error("unknown device kind")]
    InvalidDeviceKind,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl DevicesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeviceNotFound => "DEVICE_NOT_FOUND",
            Self::InvalidDeviceKind => "INVALID_DEVICE_KIND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for DevicesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DeviceNotFound => StatusCode::NOT_FOUND,
            Self::InvalidDeviceKind => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. Internal errors need the anyhow chain logged so the root cause is
        // traceable.
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
