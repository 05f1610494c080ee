//! Migration: Seed the first article and its tags.

use sea_orm::{ConnectionTrait, QueryResult};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SLUG: &str = "hello-world";
const TAGS: [&str; 2] = ["dev", "go"];

fn query_error(e: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(e.to_string())
}

/// Run an INSERT .. RETURNING id and read back the generated key.
async fn insert_returning_id(
    manager: &SchemaManager<'_>,
    mut insert: InsertStatement,
) -> Result<i32, DbErr> {
    insert.returning_col(Alias::new("id"));
    let stmt = manager.get_database_backend().build(&insert);
    let row: QueryResult = manager
        .get_connection()
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::RecordNotInserted)?;
    row.try_get("", "id")
}

/// Seeded tags still linked to the seeded article; same-named tags created
/// later are left alone.
fn delete_seeded_tags() -> DeleteStatement {
    let linked = Query::select()
        .column((ArticleTags::Table, ArticleTags::TagId))
        .from(ArticleTags::Table)
        .inner_join(
            Articles::Table,
            Expr::col((Articles::Table, Articles::Id))
                .equals((ArticleTags::Table, ArticleTags::ArticleId)),
        )
        .and_where(Expr::col((Articles::Table, Articles::Slug)).eq(SLUG))
        .to_owned();

    Query::delete()
        .from_table(Tags::Table)
        .and_where(Expr::col(Tags::Id).in_subquery(linked))
        .and_where(Expr::col(Tags::Name).is_in(TAGS))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut article = Query::insert();
        article
            .into_table(Articles::Table)
            .columns([Articles::Title, Articles::Slug, Articles::Body])
            .values([
                "Hello World".into(),
                SLUG.into(),
                "This is an hello world article".into(),
            ])
            .map_err(query_error)?;
        let article_id = insert_returning_id(manager, article.to_owned()).await?;

        for name in TAGS {
            let mut tag = Query::insert();
            tag.into_table(Tags::Table)
                .columns([Tags::Name])
                .values([name.into()])
                .map_err(query_error)?;
            let tag_id = insert_returning_id(manager, tag.to_owned()).await?;

            let mut link = Query::insert();
            link.into_table(ArticleTags::Table)
                .columns([ArticleTags::ArticleId, ArticleTags::TagId])
                .values([article_id.into(), tag_id.into()])
                .map_err(query_error)?;
            manager.exec_stmt(link.to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tags first: the join rows that identify them go with the article
        manager.exec_stmt(delete_seeded_tags()).await?;

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Articles::Table)
                    .and_where(Expr::col(Articles::Slug).eq(SLUG))
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Articles {
    Table,
    Id,
    Title,
    Slug,
    Body,
}

#[derive(Iden)]
enum Tags {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ArticleTags {
    Table,
    ArticleId,
    TagId,
}
