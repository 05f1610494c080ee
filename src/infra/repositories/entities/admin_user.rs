//! Admin user database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::AdminUser;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Password hash, never the plaintext
    pub password: String,
    pub last_login: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AdminUser {
    fn from(model: Model) -> Self {
        AdminUser {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            password_hash: model.password,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
