//! Conversational agent webhook.

use axum::{extract::State, Json};

use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::domain::{Fulfillment, WebhookRequest};
use crate::errors::AppResult;

/// Fulfill one conversational turn
///
/// Dispatches on `queryResult.action`: `random`, `search` and
/// `search.specify`.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "Webhook",
    responses(
        (status = 200, description = "Fulfillment reply"),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Unknown action"),
        (status = 500, description = "Cocktail service failure")
    )
)]
pub async fn webhook(
    State(state): State<AppState>,
    AppJson(request): AppJson<WebhookRequest>,
) -> AppResult<Json<Fulfillment>> {
    let reply = state.services.webhook().fulfill(request).await?;
    Ok(Json(reply))
}
