//! Admin command - Account management from the shell.

use std::sync::Arc;

use crate::cli::args::{AdminAction, AdminArgs};
use crate::config::Config;
use crate::domain::CreateAdminUser;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::services::{AdminUserManager, AdminUserService};
use validator::Validate;

/// Execute the admin command
pub async fn execute(args: AdminArgs, config: Config) -> AppResult<()> {
    match args.action {
        AdminAction::CreateUser {
            email,
            password,
            first_name,
            last_name,
        } => {
            let input = CreateAdminUser {
                email,
                first_name,
                last_name,
                password,
            };
            input
                .validate()
                .map_err(|e| AppError::validation(e.to_string()))?;

            let db = Database::connect(&config).await?;
            let service = AdminUserManager::new(Arc::new(Persistence::new(db.get_connection())));
            let admin = service.create_admin(input).await?;

            println!("Created admin user {} ({})", admin.id, admin.email);
        }
    }

    Ok(())
}
