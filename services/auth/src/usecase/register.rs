use chrono::Utc;
use uuid::Uuid;

use iothub_domain::email::{normalize_email, validate_email};

use crate::domain::repository::{MailerPort, OtpRepository, UserRepository};
use crate::domain::types::{AuthUser, MIN_PASSWORD_LEN, OtpPurpose};
use crate::error::AuthServiceError;
use crate::usecase::otp::issue_challenge;
use crate::usecase::password::hash_password;

pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Create an unverified identity and send the first verification code.
///
/// The user row and the challenge are durably persisted before delivery is
/// attempted: a `DeliveryFailed` outcome leaves a registered account that
/// can request a resend.
pub struct RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub users: U,
    pub otps: O,
    pub mailer: M,
}

impl<U, O, M> RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: MailerPort,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<(), AuthServiceError> {
        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(AuthServiceError::InvalidEmail);
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthServiceError::InvalidPassword);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let now = Utc::now();
        let user = AuthUser {
            id: Uuid::new_v4(),
            email,
            full_name: input.full_name,
            password_hash: hash_password(&input.password)?,
            verified: false,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

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
