use async_trait::async_trait;

use crate::domain::cart::value_objects::ProductId;
use crate::domain::errors::RepositoryError;

use super::model::Product;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}
