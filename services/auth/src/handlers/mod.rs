pub mod auth;
pub mod user;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::AuthUser;

/// Public view of a user, shared by the session and profile endpoints.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub verified: bool,
    #[serde(serialize_with = "iothub_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}
