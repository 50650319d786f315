use sea_orm::entity::prelude::*;

/// Registered device with its current-state projection columns.
///
/// `status`, `current_value` and `last_updated` mirror the newest accepted
/// reading; they are maintained in the same transaction that appends it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub unit: String,
    pub status: String,
    #[sea_orm(column_type = "Double")]
    pub current_value: f64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::readings::Entity")]
    Readings,
}

impl Related<super::readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Readings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
