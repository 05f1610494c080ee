//! Blog articles, their authors and tags.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Article with its author and tags loaded
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub author: Option<Author>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tag with every article carrying it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaggedArticles {
    pub tag: Tag,
    pub articles: Vec<Article>,
}
