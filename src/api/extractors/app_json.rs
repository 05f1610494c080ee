//! JSON extractor whose every rejection is a 400.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::errors::AppError;

/// Like [`Json`], but missing content types, syntax errors and shape
/// mismatches all become [`AppError::BadRequest`].
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Rejected request body");
            AppError::bad_request(e.body_text())
        })?;

        Ok(AppJson(value))
    }
}
