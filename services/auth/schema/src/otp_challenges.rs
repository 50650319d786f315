use sea_orm::entity::prelude::*;

/// The single pending OTP challenge for a user.
///
/// `user_id` is the primary key, so the schema itself enforces "at most one
/// active challenge per identity". Re-issuing overwrites the row and bumps
/// `generation`; consumption is a compare-and-swap on `(user_id, generation)`
/// so a validate racing a re-issue can never accept a superseded code.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_challenges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    pub code: String,
    pub generation: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
