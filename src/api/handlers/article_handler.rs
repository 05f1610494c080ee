//! Read-only blog endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::AppState;
use crate::domain::{Article, TaggedArticles};
use crate::errors::AppResult;

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/api/articles/:id", get(get_article))
        .route("/api/tags/:name", get(get_tag))
}

/// Article with its author and tags
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article found", body = Article),
        (status = 404, description = "Article not found")
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Article>> {
    let article = state.services.articles().get_article(id).await?;
    Ok(Json(article))
}

/// Tag with the articles carrying it
#[utoipa::path(
    get,
    path = "/api/tags/{name}",
    tag = "Articles",
    params(("name" = String, Path, description = "Tag name")),
    responses(
        (status = 200, description = "Tag found", body = TaggedArticles),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<TaggedArticles>> {
    let tagged = state.services.articles().get_tag(&name).await?;
    Ok(Json(tagged))
}
