//! Read access to the blog schema.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Article, TaggedArticles};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Article with its author and tags
    async fn get_article(&self, id: i32) -> AppResult<Article>;

    /// Tag with its articles, each with their own tags
    async fn get_tag(&self, name: &str) -> AppResult<TaggedArticles>;
}

pub struct ArticleReader<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ArticleReader<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ArticleService for ArticleReader<U> {
    async fn get_article(&self, id: i32) -> AppResult<Article> {
        self.uow
            .articles()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn get_tag(&self, name: &str) -> AppResult<TaggedArticles> {
        self.uow
            .articles()
            .find_tag_by_name(name)
            .await?
            .ok_or_not_found()
    }
}
