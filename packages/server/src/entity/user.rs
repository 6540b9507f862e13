use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique index on `users.email`, created by the users migration.
pub const EMAIL_UNIQUE_INDEX: &str = "ix_users_email";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,
    /// Static credential, unique. Only ever returned by the create endpoint.
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub api_key: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::link::Entity")]
    Links,
}

impl Related<super::link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Links.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Links owned by this user, newest first. Queried on every call.
    pub async fn links<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<super::link::Model>, DbErr> {
        self.find_related(super::link::Entity)
            .order_by_desc(super::link::Column::CreatedAt)
            .order_by_desc(super::link::Column::Id)
            .all(db)
            .await
    }
}
