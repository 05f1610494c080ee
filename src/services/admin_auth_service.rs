//! Admin authentication: password login and session tokens.
//!
//! The session cookie carries a signed JWT whose subject is the admin id.
//! Nothing is stored server side, so logout only drops the cookie.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{AdminUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(test)]
use mockall::automock;

/// Session token payload
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly opened admin session
#[derive(Debug)]
pub struct AdminSession {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: AdminUser,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AdminAuthService: Send + Sync {
    /// Check credentials and open a session.
    ///
    /// Unknown emails and wrong passwords both yield `InvalidCredentials`.
    async fn login(&self, email: &str, password: &str) -> AppResult<AdminSession>;

    /// Admin owning a session token.
    async fn current_user(&self, token: &str) -> AppResult<AdminUser>;
}

pub struct AdminAuthenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> AdminAuthenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    fn issue_token(&self, user: &AdminUser) -> AppResult<(String, i64)> {
        let hours = self.config.admin.session_expiration_hours;
        let invalid = || AppError::config(format!("Invalid session lifetime of {} hours", hours));

        let now = Utc::now();
        let lifetime = Duration::try_hours(hours)
            .filter(|lifetime| *lifetime > Duration::zero())
            .ok_or_else(invalid)?;
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(invalid)?;

        let claims = SessionClaims {
            sub: user.id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.cookie_secret_bytes()),
        )?;

        Ok((token, lifetime.num_seconds()))
    }

    fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.cookie_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminAuthService for AdminAuthenticator<U> {
    async fn login(&self, email: &str, password: &str) -> AppResult<AdminSession> {
        let users = self.uow.admin_users();
        let user = users.find_by_email(email).await?;

        // Unknown accounts still pay for one hash verification
        let stored = user
            .as_ref()
            .map(|u| Password::from_hash(u.password_hash.clone()))
            .unwrap_or_else(Password::unmatchable);
        let password_valid = stored.verify(password);

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::info!(email, "Rejected admin login");
                return Err(AppError::InvalidCredentials);
            }
        };

        users.touch_last_login(user.id).await?;
        let (token, expires_in) = self.issue_token(&user)?;

        tracing::info!(admin_id = user.id, "Admin logged in");
        Ok(AdminSession {
            token,
            expires_in,
            user,
        })
    }

    async fn current_user(&self, token: &str) -> AppResult<AdminUser> {
        let claims = self.verify_token(token)?;
        self.uow
            .admin_users()
            .find_by_id(claims.sub)
            .await?
            .filter(|user| !user.is_deleted())
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{AdminUserRepository, MockAdminUserRepository, MockUnitOfWork};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn admin(password: &str) -> AdminUser {
        let now = Utc::now();
        AdminUser {
            id: 7,
            email: "admin@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            last_login: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn authenticator(repo: MockAdminUserRepository) -> AdminAuthenticator<MockUnitOfWork> {
        let repo: Arc<dyn AdminUserRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_admin_users().returning(move || repo.clone());

        AdminAuthenticator::new(Arc::new(uow), Config::default().with_cookie_secret(SECRET))
    }

    #[tokio::test]
    async fn login_issues_token_for_valid_credentials() {
        let user = admin("password123");
        let mut repo = MockAdminUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_touch_last_login()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let auth = authenticator(repo);
        let session = auth.login("admin@example.com", "password123").await.unwrap();

        assert_eq!(session.user.id, 7);
        assert_eq!(session.expires_in, 24 * 3600);
        assert_eq!(auth.verify_token(&session.token).unwrap().sub, 7);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let user = admin("password123");
        let mut repo = MockAdminUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_touch_last_login().never();

        let err = authenticator(repo)
            .login("admin@example.com", "password124")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let mut repo = MockAdminUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let err = authenticator(repo)
            .login("nobody@example.com", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn current_user_resolves_token_owner() {
        let user = admin("password123");
        let token_user = user.clone();
        let mut repo = MockAdminUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 7)
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(repo);
        let (token, _) = auth.issue_token(&token_user).unwrap();

        assert_eq!(auth.current_user(&token).await.unwrap().email, "admin@example.com");
    }

    #[tokio::test]
    async fn current_user_rejects_deleted_owner() {
        let mut user = admin("password123");
        user.deleted_at = Some(Utc::now());
        let stored = user.clone();
        let mut repo = MockAdminUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));

        let auth = authenticator(repo);
        let (token, _) = auth.issue_token(&user).unwrap();

        assert!(matches!(auth.current_user(&token).await, Err(AppError::Unauthorized)));
    }

    fn with_lifetime(hours: i64) -> AdminAuthenticator<MockUnitOfWork> {
        let mut config = Config::default().with_cookie_secret(SECRET);
        config.admin.session_expiration_hours = hours;
        AdminAuthenticator::new(Arc::new(MockUnitOfWork::new()), config)
    }

    #[test]
    fn out_of_range_lifetime_is_an_error_not_a_panic() {
        let user = admin("password123");

        for hours in [i64::MAX, i64::MIN, 0, -1] {
            let err = with_lifetime(hours).issue_token(&user).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{} hours", hours);
        }
    }

    #[test]
    fn issued_token_verifies_for_shortest_lifetime() {
        let auth = with_lifetime(1);
        let (token, expires_in) = auth.issue_token(&admin("password123")).unwrap();

        assert_eq!(expires_in, 3600);
        assert_eq!(auth.verify_token(&token).unwrap().sub, 7);
    }

    #[tokio::test]
    async fn current_user_rejects_forged_token() {
        let auth = authenticator(MockAdminUserRepository::new());
        let err = auth.current_user("not.a.token").await.unwrap_err();
        assert!(matches!(err, AppError::Session(_)));
    }
}
