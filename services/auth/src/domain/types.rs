use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registered user identity as the auth service sees it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    /// argon2id PHC string; never compared in plaintext.
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The single pending OTP challenge for a user.
///
/// Exactly one slot per user exists at a time; re-issuing replaces the slot
/// and bumps `generation` so a stale code can never be consumed.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub user_id: Uuid,
    pub code: String,
    pub generation: i64,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Wall-clock expiry check at time of validation; skew is not compensated.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// What an OTP email is for. Picks the subject line and body copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
}

/// OTP length in decimal digits.
pub const OTP_LEN: usize = 6;

/// OTP validity window in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;
