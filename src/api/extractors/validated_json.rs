//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::AppJson;
use crate::errors::AppError;

/// JSON body that must also pass its `validator` rules.
///
/// ```rust,ignore
/// async fn create_product(ValidatedJson(input): ValidatedJson<ProductInput>) {
///     // input.name is non-empty, input.price is not negative
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    AppJson<T>: FromRequest<S, Rejection = AppError>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors into one message.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductInput;
    use axum::{body::Body, http::header::CONTENT_TYPE, http::StatusCode};

    async fn extract(body: &'static str) -> Result<ProductInput, AppError> {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        ValidatedJson::<ProductInput>::from_request(req, &())
            .await
            .map(|ValidatedJson(v)| v)
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let input = extract(r#"{"name":"Shaker","price":1500,"tags":"bar"}"#).await.unwrap();
        assert_eq!(input.name, "Shaker");
    }

    #[tokio::test]
    async fn rule_violations_are_bad_requests() {
        let err = extract(r#"{"name":"","price":-1}"#).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let err = extract("{not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
