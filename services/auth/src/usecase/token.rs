use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use iothub_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims};
use iothub_domain::email::normalize_email;

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;
use crate::usecase::otp::validate_and_consume;
use crate::usecase::password::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Mint a session token binding only the user id, with a fixed 30-day
/// lifetime. Stateless — no session row is written anywhere.
pub fn issue_access_token(
    user_id: Uuid,
    secret: &str,
) -> Result<(String, u64), AuthServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

#[derive(Debug)]
pub struct SessionOutput {
    pub user: AuthUser,
    pub access_token: String,
    pub access_token_exp: u64,
}

// ── VerifyOtp (email verification → session) ─────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<U: UserRepository, O: OtpRepository> {
    pub users: U,
    pub otps: O,
    pub jwt_secret: String,
}

impl<U: UserRepository, O: OtpRepository> VerifyOtpUseCase<U, O> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<SessionOutput, AuthServiceError> {
        let email = normalize_email(&input.email);
        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        validate_and_consume(&self.otps, user.id, &input.code).await?;

        if !user.verified {
            self.users.set_verified(user.id).await?;
            user.verified = true;
        }

        let (access_token, access_token_exp) = issue_access_token(user.id, &self.jwt_secret)?;

        Ok(SessionOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}

// ── Login (password → session) ───────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<SessionOutput, AuthServiceError> {
        let email = normalize_email(&input.email);

        // Unknown email and wrong password are the same outcome on purpose.
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredential)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredential);
        }

        if !user.verified {
            return Err(AuthServiceError::NotVerified);
        }

        let (access_token, access_token_exp) = issue_access_token(user.id, &self.jwt_secret)?;

        Ok(SessionOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}
