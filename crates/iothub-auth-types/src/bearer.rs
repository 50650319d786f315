//! Bearer-token extractor — the single enforcement point for protected routes.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_access_token;

/// Supplies the JWT signing secret to the [`BearerIdentity`] extractor.
///
/// Implemented by each service's `AppState`; any process holding the secret
/// can verify any token issued with it.
pub trait JwtSecretSource {
    fn jwt_secret(&self) -> &str;
}

/// User identity resolved from the `Authorization: Bearer <jwt>` header.
///
/// Returns 401 if the header is absent, not a bearer scheme, or the token
/// fails signature/expiry validation. Handlers behind this extractor never
/// re-check identity.
#[derive(Debug, Clone)]
pub struct BearerIdentity {
    pub user_id: Uuid,
    pub access_token_exp: u64,
}

impl<S> FromRequestParts<S> for BearerIdentity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        let info = token
            .and_then(|t| validate_access_token(&t, state.jwt_secret()).ok());

        async move {
            let info = info.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                access_token_exp: info.access_token_exp,
            })
        }
    }
}
