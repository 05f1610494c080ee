//! Product repository with soft delete support.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::Product;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Product persistence.
///
/// Queries never return soft-deleted rows.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find active product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// One page of active products, oldest first, with the total count
    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)>;

    async fn create(&self, name: String, price: i32, tags: Vec<String>) -> AppResult<Product>;

    async fn update(
        &self,
        id: Uuid,
        name: String,
        price: i32,
        tags: Vec<String>,
    ) -> AppResult<Product>;

    /// Soft delete product by ID (sets deleted_at timestamp)
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// sea-orm backed [`ProductRepository`]
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active(&self, id: Uuid) -> AppResult<product::Model> {
        ProductEntity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(Product::from))
    }

    async fn list(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        let paginator = ProductEntity::find()
            .filter(product::Column::DeletedAt.is_null())
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Product::from).collect(), total))
    }

    async fn create(&self, name: String, price: i32, tags: Vec<String>) -> AppResult<Product> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            price: Set(price),
            tags: Set(tags),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: String,
        price: i32,
        tags: Vec<String>,
    ) -> AppResult<Product> {
        let mut active: ActiveModel = self.find_active(id).await?.into();
        active.name = Set(name);
        active.price = Set(price);
        active.tags = Set(tags);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active(id).await?.into();
        let now = Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }
}
