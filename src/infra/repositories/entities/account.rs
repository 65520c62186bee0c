//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Account;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Opaque Argon2 hash, never the plaintext
    #[sea_orm(column_name = "_hashed_password")]
    pub hashed_password: String,
    #[sea_orm(column_name = "_hashed_salt")]
    pub hashed_salt: String,
    pub is_admin: bool,
    pub is_logged_in: bool,
    pub is_verified: bool,
    /// Server-assigned at insert (`DEFAULT now()`)
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Account {
            id: model.id,
            username: model.username,
            email: model.email,
            hashed_password: model.hashed_password,
            hashed_salt: model.hashed_salt,
            is_admin: model.is_admin,
            is_logged_in: model.is_logged_in,
            is_verified: model.is_verified,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
