//! Admin login and logout.
//!
//! Browser-facing: every outcome is either the login page or a 303 redirect.

use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::admin::AdminPaths;
use crate::api::middleware::session_token;
use crate::api::AppState;
use crate::config::SESSION_COOKIE_NAME;
use crate::utils::login_page;

/// Login form fields; absent fields read as blank
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub fn session_routes(paths: &AdminPaths) -> Router<AppState> {
    Router::new()
        .route(&paths.login, get(show_login).post(login))
        .route(&paths.logout, get(logout))
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Login page, or straight to the admin when already signed in.
pub async fn show_login(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        if state.services.admin_auth().current_user(token).await.is_ok() {
            return Redirect::to(&state.admin.paths.admin).into_response();
        }
    }

    Html(login_page(&state.admin.site_name, &state.admin.paths.login)).into_response()
}

/// Check credentials and open a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let paths = &state.admin.paths;

    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable login form");
            return Redirect::to(&paths.login).into_response();
        }
    };

    if form.email.is_empty() || form.password.is_empty() {
        return Redirect::to(&paths.login).into_response();
    }

    match state
        .services
        .admin_auth()
        .login(&form.email, &form.password)
        .await
    {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token));
            (jar, Redirect::to(&paths.admin)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            Redirect::to(&paths.login).into_response()
        }
    }
}

/// Drop the session cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.remove(session_cookie(String::new()));
    (jar, Redirect::to(&state.admin.paths.login)).into_response()
}
