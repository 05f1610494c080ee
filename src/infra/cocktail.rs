//! HTTP client for the public cocktail database.
//!
//! Plain GET requests with a bounded timeout; no retries. Non-2xx statuses
//! and undecodable bodies are errors.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::domain::{FullDrink, FullDrinkList};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Cocktail lookups used by the webhook.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CocktailApi: Send + Sync {
    /// One random drink.
    async fn random_drink(&self) -> AppResult<FullDrink>;

    /// Drinks whose name matches `name`; empty when nothing matches.
    async fn search_by_name(&self, name: &str) -> AppResult<Vec<FullDrink>>;

    /// Drink by upstream id.
    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<FullDrink>>;
}

/// reqwest-backed implementation of [`CocktailApi`]
#[derive(Clone)]
pub struct CocktailClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CocktailClient {
    /// Build a client from configuration.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.cocktail_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(http, &config.cocktail.base_url)
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> AppResult<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid cocktail API path {}: {}", path, e)))?;

        tracing::debug!(%url, "Querying cocktail API");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

/// Parse the base URL, making sure relative paths resolve underneath it.
fn parse_base_url(raw: &str) -> AppResult<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&normalized)
        .map_err(|e| AppError::config(format!("Invalid cocktail API URL '{}': {}", raw, e)))
}

#[async_trait]
impl CocktailApi for CocktailClient {
    async fn random_drink(&self) -> AppResult<FullDrink> {
        let list: FullDrinkList = self.get("random.php", &[]).await?;
        list.drinks
            .into_iter()
            .next()
            .ok_or_else(|| AppError::UpstreamData("random drink list is empty".to_string()))
    }

    async fn search_by_name(&self, name: &str) -> AppResult<Vec<FullDrink>> {
        let list: FullDrinkList = self.get("search.php", &[("s", name)]).await?;
        Ok(list.drinks)
    }

    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<FullDrink>> {
        let list: FullDrinkList = self.get("lookup.php", &[("i", id)]).await?;
        Ok(list.drinks.into_iter().next())
    }
}
