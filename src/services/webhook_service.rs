//! Webhook fulfillment: turns a conversational query into a bartender reply.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{CONTEXT_SEARCH_FOLLOWUP, CONTEXT_SEARCH_FOLLOWUP_LIFESPAN, PARAM_DRINK};
use crate::domain::{Action, Context, Drink, Fulfillment, FullDrink, WebhookRequest};
use crate::errors::{AppError, AppResult};
use crate::infra::CocktailApi;

const ASK_FOR_NAME: &str = "Which cocktail are you looking for?";

#[cfg(test)]
use mockall::automock;

/// Webhook service trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebhookService: Send + Sync {
    /// Answer one webhook call.
    ///
    /// # Errors
    /// `NotFound` for an action outside the known set, upstream errors when
    /// the cocktail API fails.
    async fn fulfill(&self, request: WebhookRequest) -> AppResult<Fulfillment>;
}

/// [`WebhookService`] backed by the cocktail database.
pub struct Bartender {
    cocktails: Arc<dyn CocktailApi>,
}

impl Bartender {
    pub fn new(cocktails: Arc<dyn CocktailApi>) -> Self {
        Self { cocktails }
    }

    async fn random(&self) -> AppResult<Fulfillment> {
        let drink = self.cocktails.random_drink().await.inspect_err(|e| {
            tracing::error!(error = %e, "Couldn't get random drink");
        })?;

        Ok(Fulfillment::say(format!("I found that cocktail : {}", drink.name))
            .with_payload(drinks_payload(std::slice::from_ref(&drink))))
    }

    async fn search(&self, session: &str, name: Option<String>) -> AppResult<Fulfillment> {
        let Some(name) = name else {
            return Ok(Fulfillment::say(ASK_FOR_NAME).with_context(Context {
                name: format!("{}/contexts/{}", session, CONTEXT_SEARCH_FOLLOWUP),
                lifespan_count: CONTEXT_SEARCH_FOLLOWUP_LIFESPAN,
                ..Context::default()
            }));
        };

        let drinks = self.cocktails.search_by_name(&name).await.inspect_err(|e| {
            tracing::error!(error = %e, drink = %name, "Couldn't search drinks");
        })?;

        let Some(first) = drinks.first() else {
            return Ok(Fulfillment::say(format!(
                "I couldn't find any cocktail named {}",
                name
            )));
        };

        let reply = if drinks.len() == 1 {
            format!("I found that cocktail : {}", first.name)
        } else {
            format!(
                "I found {} cocktails named {}, here is the first one : {}",
                drinks.len(),
                name,
                first.name
            )
        };

        Ok(Fulfillment::say(reply).with_payload(drinks_payload(&drinks)))
    }
}

/// Minimal drink records for rich clients.
fn drinks_payload(drinks: &[FullDrink]) -> serde_json::Value {
    let drinks: Vec<Drink> = drinks.iter().map(Drink::from).collect();
    serde_json::json!({ "drinks": drinks })
}

#[async_trait]
impl WebhookService for Bartender {
    async fn fulfill(&self, request: WebhookRequest) -> AppResult<Fulfillment> {
        let query = &request.query_result;
        let action: Action = query.action.parse().map_err(|e| {
            tracing::warn!(error = %e, "Unknown action");
            AppError::NotFound
        })?;

        tracing::info!(%action, "Action detected");

        match action {
            Action::Random => self.random().await,
            Action::Search => {
                let name = query.string_param(PARAM_DRINK);
                self.search(&request.session, name).await
            }
            Action::SearchSpecify => {
                let name = query
                    .string_param(PARAM_DRINK)
                    .or_else(|| query.context_param(CONTEXT_SEARCH_FOLLOWUP, PARAM_DRINK));
                self.search(&request.session, name).await
            }
        }
    }
}
