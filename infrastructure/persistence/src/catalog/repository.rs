use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::cart::value_objects::ProductId;
use business::domain::catalog::model::Product;
use business::domain::catalog::repository::ProductCatalog;
use business::domain::errors::RepositoryError;

use super::entity::ProductEntity;
use crate::database_error;

pub struct ProductCatalogPostgres {
    pool: PgPool,
}

impl ProductCatalogPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for ProductCatalogPostgres {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let entity =
            sqlx::query_as::<_, ProductEntity>("SELECT id, name FROM products WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

        entity.map(|e| e.into_domain()).transpose()
    }
}
