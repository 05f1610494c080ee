//! Product catalogue management for the admin surface.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Product, ProductInput};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

#[cfg(test)]
use mockall::automock;

/// Product service trait for dependency injection.
///
/// Soft-deleted products are invisible to every operation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self, params: PaginationParams) -> AppResult<Paginated<Product>>;

    async fn get_product(&self, id: Uuid) -> AppResult<Product>;

    async fn create_product(&self, input: ProductInput) -> AppResult<Product>;

    async fn update_product(&self, id: Uuid, input: ProductInput) -> AppResult<Product>;

    /// Soft delete (sets deleted_at timestamp)
    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn list_products(&self, params: PaginationParams) -> AppResult<Paginated<Product>> {
        let (products, total) = self.uow.products().list(&params).await?;
        Ok(Paginated::new(products, params.page, params.limit(), total))
    }

    async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_product(&self, input: ProductInput) -> AppResult<Product> {
        let tags = input.parsed_tags();
        let product = self
            .uow
            .products()
            .create(input.name, input.price, tags)
            .await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        let tags = input.parsed_tags();
        self.uow
            .products()
            .update(id, input.name, input.price, tags)
            .await
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        self.uow.products().delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{MockProductRepository, MockUnitOfWork, ProductRepository};

    fn manager(repo: MockProductRepository) -> ProductManager<MockUnitOfWork> {
        let repo: Arc<dyn ProductRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_products().returning(move || repo.clone());
        ProductManager::new(Arc::new(uow))
    }

    fn input(tags: &str) -> ProductInput {
        ProductInput {
            name: "Shaker".to_string(),
            price: 1500,
            tags: tags.to_string(),
        }
    }

    #[tokio::test]
    async fn create_parses_tag_field() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|name, price, tags| {
                name == "Shaker" && *price == 1500 && tags == &["bar".to_string(), "steel".to_string()]
            })
            .times(1)
            .returning(|name, price, tags| Ok(Product::new(name, price, tags)));

        let product = manager(repo).create_product(input(" bar, steel ,")).await.unwrap();
        assert_eq!(product.tags, vec!["bar", "steel"]);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = manager(repo).get_product(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn list_wraps_page_metadata() {
        let mut repo = MockProductRepository::new();
        repo.expect_list().returning(|_| {
            Ok((vec![Product::new("Shaker".into(), 1500, vec![])], 41))
        });

        let page = manager(repo)
            .list_products(PaginationParams { page: 2, per_page: 20 })
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total, 41);
        assert_eq!(page.meta.total_pages, 3);
    }
}
