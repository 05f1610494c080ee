//! Read-only access to blog articles and tags.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use super::entities::{
    article::{self, Entity as ArticleEntity},
    author::Entity as AuthorEntity,
    tag::{self, Entity as TagEntity},
};
use crate::domain::{Article, Author, Tag, TaggedArticles};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Active article with its author and tags
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Article>>;

    /// Active tag with every active article carrying it
    async fn find_tag_by_name(&self, name: &str) -> AppResult<Option<TaggedArticles>>;
}

/// sea-orm backed [`ArticleRepository`]
pub struct ArticleStore {
    db: DatabaseConnection,
}

impl ArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load author and tags for one article row.
    async fn load(&self, model: article::Model) -> AppResult<Article> {
        let author = match model.author_id {
            Some(author_id) => AuthorEntity::find_by_id(author_id)
                .one(&self.db)
                .await?
                .map(Author::from),
            None => None,
        };

        let tags = model
            .find_related(TagEntity)
            .filter(tag::Column::DeletedAt.is_null())
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Tag::from)
            .collect();

        Ok(model.into_domain(author, tags))
    }
}

#[async_trait]
impl ArticleRepository for ArticleStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Article>> {
        let model = ArticleEntity::find_by_id(id)
            .filter(article::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(self.load(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_tag_by_name(&self, name: &str) -> AppResult<Option<TaggedArticles>> {
        let Some(tag_model) = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .filter(tag::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let models = tag_model
            .find_related(ArticleEntity)
            .filter(article::Column::DeletedAt.is_null())
            .order_by_asc(article::Column::Id)
            .all(&self.db)
            .await?;

        let mut articles = Vec::with_capacity(models.len());
        for model in models {
            articles.push(self.load(model).await?);
        }

        Ok(Some(TaggedArticles {
            tag: Tag::from(tag_model),
            articles,
        }))
    }
}
