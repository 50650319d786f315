use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

use iothub_auth_schema::{otp_challenges, users};

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::{AuthUser, OtpChallenge};
use crate::error::AuthServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &AuthUser) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            full_name: Set(user.full_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            verified: Set(user.verified),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn set_verified(&self, id: Uuid) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            verified: Set(true),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user verified")?;
        Ok(())
    }

    async fn update_full_name(&self, id: Uuid, full_name: &str) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            full_name: Set(full_name.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user full name")?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password hash")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> AuthUser {
    AuthUser {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        password_hash: model.password_hash,
        verified: model.verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP challenge repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn replace(&self, challenge: &OtpChallenge) -> Result<OtpChallenge, AuthServiceError> {
        // Read-then-write inside one transaction: the row lock on the slot
        // serializes concurrent issuance, so exactly one challenge survives
        // (last writer wins) and the generation stamp never repeats.
        let stored = self
            .db
            .transaction::<_, otp_challenges::Model, sea_orm::DbErr>(|txn| {
                let challenge = challenge.clone();
                Box::pin(async move {
                    let existing = otp_challenges::Entity::find_by_id(challenge.user_id)
                        .one(txn)
                        .await?;

                    match existing {
                        Some(prev) => {
                            let next_generation = prev.generation + 1;
                            let mut am: otp_challenges::ActiveModel = prev.into();
                            am.code = Set(challenge.code.clone());
                            am.generation = Set(next_generation);
                            am.expires_at = Set(challenge.expires_at);
                            am.issued_at = Set(challenge.issued_at);
                            am.update(txn).await
                        }
                        None => {
                            otp_challenges::ActiveModel {
                                user_id: Set(challenge.user_id),
                                code: Set(challenge.code.clone()),
                                generation: Set(1),
                                expires_at: Set(challenge.expires_at),
                                issued_at: Set(challenge.issued_at),
                            }
                            .insert(txn)
                            .await
                        }
                    }
                })
            })
            .await
            .context("replace otp challenge")?;
        Ok(challenge_from_model(stored))
    }

    async fn find_current(
        &self,
        user_id: Uuid,
    ) -> Result<Option<OtpChallenge>, AuthServiceError> {
        let model = otp_challenges::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find current otp challenge")?;
        Ok(model.map(challenge_from_model))
    }

    async fn consume(&self, user_id: Uuid, generation: i64) -> Result<bool, AuthServiceError> {
        // CAS on (user_id, generation): zero rows affected means a racing
        // re-issue superseded the challenge we validated against.
        let result = otp_challenges::Entity::delete_many()
            .filter(otp_challenges::Column::UserId.eq(user_id))
            .filter(otp_challenges::Column::Generation.eq(generation))
            .exec(&self.db)
            .await
            .context("consume otp challenge")?;
        Ok(result.rows_affected > 0)
    }
}

fn challenge_from_model(model: otp_challenges::Model) -> OtpChallenge {
    OtpChallenge {
        user_id: model.user_id,
        code: model.code,
        generation: model.generation,
        expires_at: model.expires_at,
        issued_at: model.issued_at,
    }
}
