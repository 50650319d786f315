use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use iothub_domain::email::normalize_email;

use crate::domain::repository::{MailerPort, OtpRepository, UserRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, OtpChallenge, OtpPurpose};
use crate::error::AuthServiceError;

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Issue a fresh challenge into the user's single slot. Any still-valid
/// previous code is invalidated — only the newest code is ever acceptable.
///
/// The returned challenge carries the generation stamp assigned by the
/// store.
pub async fn issue_challenge<O: OtpRepository>(
    otps: &O,
    user_id: Uuid,
) -> Result<OtpChallenge, AuthServiceError> {
    let now = Utc::now();
    let challenge = OtpChallenge {
        user_id,
        code: generate_code(),
        // Assigned by the store on replace.
        generation: 0,
        expires_at: now + Duration::seconds(OTP_TTL_SECS),
        issued_at: now,
    };
    otps.replace(&challenge).await
}

/// Validate a submitted code against the user's pending challenge and
/// consume it on success (single use).
///
/// Every failure mode — no pending challenge, expired, mismatch, or a
/// concurrent re-issue winning the CAS — collapses into `InvalidOtp` so the
/// caller cannot distinguish which check failed.
pub async fn validate_and_consume<O: OtpRepository>(
    otps: &O,
    user_id: Uuid,
    submitted: &str,
) -> Result<(), AuthServiceError> {
    let challenge = otps
        .find_current(user_id)
        .await?
        .ok_or(AuthServiceError::InvalidOtp)?;

    if challenge.is_expired() || challenge.code != submitted {
        return Err(AuthServiceError::InvalidOtp);
    }

    if !otps.consume(user_id, challenge.generation).await? {
        return Err(AuthServiceError::InvalidOtp);
    }

    Ok(())
}

// ── ResendOtp ────────────────────────────────────────────────────────────────

pub struct ResendOtpInput {
    pub email: String,
}

/// Re-issue the verification code and deliver it again. Supersedes any
/// pending code; delivery failure propagates after the new challenge is
/// already persisted.
pub struct ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> ResendOtpUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub async fn execute(&self, input: ResendOtpInput) -> Result<(), AuthServiceError> {
        let email = normalize_email(&input.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let challenge = issue_challenge(&self.otps, user.id).await?;
        self.mailer
            .deliver_otp(
                &user.email,
                &user.full_name,
                &challenge.code,
                OtpPurpose::EmailVerification,
            )
            .await
    }
}
