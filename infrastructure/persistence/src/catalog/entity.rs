use sqlx::FromRow;

use business::domain::cart::value_objects::ProductId;
use business::domain::catalog::model::Product;
use business::domain::errors::RepositoryError;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub name: String,
}

impl ProductEntity {
    pub fn into_domain(self) -> Result<Product, RepositoryError> {
        Ok(Product {
            id: ProductId::try_from(self.id).map_err(|_| RepositoryError::corrupted_record())?,
            name: self.name,
        })
    }
}
