use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::AuthUser;
use crate::error::AuthServiceError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<AuthUser, AuthServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub full_name: String,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<AuthUser, AuthServiceError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        self.users
            .update_full_name(user_id, &input.full_name)
            .await?;
        user.full_name = input.full_name;
        Ok(user)
    }
}
