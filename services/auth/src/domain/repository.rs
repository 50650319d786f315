#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{AuthUser, OtpChallenge, OtpPurpose};
use crate::error::AuthServiceError;

/// Repository for user identities.
pub trait UserRepository: Send + Sync {
    /// Look up by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError>;

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError>;

    /// Mark the user's email as verified.
    async fn set_verified(&self, id: Uuid) -> Result<(), AuthServiceError>;

    async fn update_full_name(&self, id: Uuid, full_name: &str) -> Result<(), AuthServiceError>;

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError>;
}

/// Repository for the per-user single-slot OTP challenge.
pub trait OtpRepository: Send + Sync {
    /// Overwrite the user's challenge slot (insert when absent), bumping the
    /// generation stamp. Any previously pending code becomes unacceptable.
    async fn replace(&self, challenge: &OtpChallenge) -> Result<OtpChallenge, AuthServiceError>;

    /// The currently pending challenge, expired or not.
    async fn find_current(&self, user_id: Uuid) -> Result<Option<OtpChallenge>, AuthServiceError>;

    /// Compare-and-swap consume: delete the slot only if it still carries
    /// `generation`. Returns `false` when a concurrent re-issue superseded
    /// the challenge the caller validated against.
    async fn consume(&self, user_id: Uuid, generation: i64) -> Result<bool, AuthServiceError>;
}

/// Port for out-of-band OTP delivery. Deliver-or-fail: implementations must
/// surface failure as `DeliveryFailed`, never swallow it.
pub trait MailerPort: Send + Sync {
    async fn deliver_otp(
        &self,
        to: &str,
        full_name: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), AuthServiceError>;
}
