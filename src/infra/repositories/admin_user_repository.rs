//! Admin user repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    NotSet, QueryOrder, Set,
};

use super::entities::admin_user::{self, ActiveModel, Entity as AdminUserEntity};
use crate::domain::AdminUser;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Column values for a new admin user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminUserChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
}

/// Admin user persistence.
///
/// By default, query methods exclude soft-deleted records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    /// Find active admin by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<AdminUser>>;

    /// Find active admin by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>>;

    /// Find admin by email including soft-deleted.
    ///
    /// The unique index covers deleted rows too.
    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<AdminUser>>;

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<AdminUser>, u64)>;

    async fn create(&self, user: NewAdminUser) -> AppResult<AdminUser>;

    async fn update(&self, id: i32, changes: AdminUserChanges) -> AppResult<AdminUser>;

    /// Stamp `last_login` with the current time
    async fn touch_last_login(&self, id: i32) -> AppResult<()>;

    /// Soft delete admin by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// sea-orm backed [`AdminUserRepository`]
pub struct AdminUserStore {
    db: DatabaseConnection,
}

impl AdminUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(&self, id: i32) -> AppResult<admin_user::Model> {
        AdminUserEntity::find_by_id(id)
            .filter(admin_user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl AdminUserRepository for AdminUserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find_by_id(id)
            .filter(admin_user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(AdminUser::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find()
            .filter(admin_user::Column::Email.eq(email))
            .filter(admin_user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(AdminUser::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let result = AdminUserEntity::find()
            .filter(admin_user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(AdminUser::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<AdminUser>, u64)> {
        let paginator = AdminUserEntity::find()
            .filter(admin_user::Column::DeletedAt.is_null())
            .order_by_asc(admin_user::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(AdminUser::from).collect(), total))
    }

    async fn create(&self, user: NewAdminUser) -> AppResult<AdminUser> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            password: Set(user.password_hash),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(AdminUser::from(model))
    }

    async fn update(&self, id: i32, changes: AdminUserChanges) -> AppResult<AdminUser> {
        let mut active: ActiveModel = self.find_active(id).await?.into();

        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(hash) = changes.password_hash {
            active.password = Set(hash);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(AdminUser::from(model))
    }

    async fn touch_last_login(&self, id: i32) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active(id).await?.into();
        active.last_login = Set(Some(Utc::now()));

        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active(id).await?.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }
}
