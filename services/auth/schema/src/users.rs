use sea_orm::entity::prelude::*;

/// Registered user identity.
///
/// `email` is stored normalized (trimmed, lowercase) and is unique.
/// `password_hash` is an argon2id PHC string — plaintext never touches disk.
/// Rows are never hard-deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::otp_challenges::Entity")]
    OtpChallenge,
}

impl Related<super::otp_challenges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtpChallenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
