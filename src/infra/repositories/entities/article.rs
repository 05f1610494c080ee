//! Article database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Article, Author, Tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
    pub title: String,
    /// Added after the table existed, hence nullable
    #[sea_orm(unique)]
    pub slug: Option<String>,
    pub body: String,
    pub author_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Restrict",
        on_delete = "Restrict"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::article_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::article_tag::Relation::Article.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain article from this row and its loaded relations.
    pub fn into_domain(self, author: Option<Author>, tags: Vec<Tag>) -> Article {
        Article {
            id: self.id,
            title: self.title,
            slug: self.slug.unwrap_or_default(),
            body: self.body,
            author,
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
