//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20180601_000001_uuid_precheck;
mod m20180601_000002_create_products;
mod m20180601_000003_create_admin_users;
mod m20180601_000004_add_product_tags;
mod m20180701_000001_create_articles_and_tags;
mod m20180701_000002_add_article_fields;
mod m20180701_000003_article_fixtures;
mod m20180701_000004_add_authors;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20180601_000001_uuid_precheck::Migration),
            Box::new(m20180601_000002_create_products::Migration),
            Box::new(m20180601_000003_create_admin_users::Migration),
            Box::new(m20180601_000004_add_product_tags::Migration),
            Box::new(m20180701_000001_create_articles_and_tags::Migration),
            Box::new(m20180701_000002_add_article_fields::Migration),
            Box::new(m20180701_000003_article_fixtures::Migration),
            Box::new(m20180701_000004_add_authors::Migration),
        ]
    }
}
