//! Admin account management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{AdminUser, CreateAdminUser, Password, UpdateAdminUser};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{AdminUserChanges, NewAdminUser, UnitOfWork};
use crate::types::{Paginated, PaginationParams};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminUserService: Send + Sync {
    async fn list_admins(&self, params: PaginationParams) -> AppResult<Paginated<AdminUser>>;

    async fn get_admin(&self, id: i32) -> AppResult<AdminUser>;

    /// Create an admin; the email must not belong to any account, deleted
    /// ones included.
    async fn create_admin(&self, input: CreateAdminUser) -> AppResult<AdminUser>;

    /// Apply an edit. The password only changes when a non-blank one is
    /// submitted.
    async fn update_admin(&self, id: i32, input: UpdateAdminUser) -> AppResult<AdminUser>;

    async fn delete_admin(&self, id: i32) -> AppResult<()>;
}

pub struct AdminUserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminUserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> AppResult<()> {
        match self.uow.admin_users().find_by_email_with_deleted(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("Admin user")),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminUserService for AdminUserManager<U> {
    async fn list_admins(&self, params: PaginationParams) -> AppResult<Paginated<AdminUser>> {
        let (admins, total) = self.uow.admin_users().list(&params).await?;
        Ok(Paginated::new(admins, params.page, params.limit(), total))
    }

    async fn get_admin(&self, id: i32) -> AppResult<AdminUser> {
        self.uow
            .admin_users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_admin(&self, input: CreateAdminUser) -> AppResult<AdminUser> {
        self.ensure_email_free(&input.email, None).await?;
        let password_hash = Password::new(&input.password)?.into_string();

        let admin = self
            .uow
            .admin_users()
            .create(NewAdminUser {
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash,
            })
            .await?;

        tracing::info!(admin_id = admin.id, "Admin user created");
        Ok(admin)
    }

    async fn update_admin(&self, id: i32, input: UpdateAdminUser) -> AppResult<AdminUser> {
        if let Some(email) = &input.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let password_hash = match input.new_password() {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        self.uow
            .admin_users()
            .update(
                id,
                AdminUserChanges {
                    email: input.email,
                    first_name: input.first_name,
                    last_name: input.last_name,
                    password_hash,
                },
            )
            .await
    }

    async fn delete_admin(&self, id: i32) -> AppResult<()> {
        self.uow.admin_users().delete(id).await?;
        tracing::info!(admin_id = id, "Admin user deleted");
        Ok(())
    }
}
