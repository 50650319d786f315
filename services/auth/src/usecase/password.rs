//! Password hashing (argon2id) and the password lifecycle use cases.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use iothub_domain::email::normalize_email;

use crate::domain::repository::{MailerPort, OtpRepository, UserRepository};
use crate::domain::types::{MIN_PASSWORD_LEN, OtpPurpose};
use crate::error::AuthServiceError;
use crate::usecase::otp::{issue_challenge, validate_and_consume};

/// Hash a password using argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a password against a stored argon2id hash. An unparsable stored
/// hash verifies as false rather than erroring — the caller sees the same
/// uniform credential failure either way.
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub email: String,
}

/// Issue a password-reset challenge and deliver it. The challenge persists
/// even when delivery fails, so a resend does not require a new issuance —
/// though re-issuing is always safe.
pub struct ForgotPasswordUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> ForgotPasswordUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub async fn execute(&self, input: ForgotPasswordInput) -> Result<(), AuthServiceError> {
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
                OtpPurpose::PasswordReset,
            )
            .await
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
}

impl<U: UserRepository, O: OtpRepository> ResetPasswordUseCase<U, O> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        if input.new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthServiceError::InvalidPassword);
        }

        let email = normalize_email(&input.email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        validate_and_consume(&self.otps, user.id, &input.code).await?;

        let hash = hash_password(&input.new_password)?;
        self.users.update_password_hash(user.id, &hash).await
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: uuid::Uuid,
        input: ChangePasswordInput,
    ) -> Result<(), AuthServiceError> {
        if input.new_password.len() < MIN_PASSWORD_LEN {
            return Err(AuthServiceError::InvalidPassword);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !verify_password(&input.current_password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredential);
        }

        let hash = hash_password(&input.new_password)?;
        self.users.update_password_hash(user.id, &hash).await
    }
}
