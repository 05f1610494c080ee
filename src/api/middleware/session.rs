//! Cookie session gate for the admin routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::AdminUser;

/// Admin owning the current session, set by [`require_admin_session`]
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub AdminUser);

/// Session token carried by the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
}

/// Let the request through only with a valid admin session; otherwise send
/// the browser to the login page.
pub async fn require_admin_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return Redirect::to(&state.admin.paths.login).into_response();
    };

    match state.services.admin_auth().current_user(token).await {
        Ok(admin) => {
            request.extensions_mut().insert(CurrentAdmin(admin));
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Admin session rejected");
            Redirect::to(&state.admin.paths.login).into_response()
        }
    }
}
