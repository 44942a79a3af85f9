use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::model::{CartLineItem, CartSession};
use business::domain::cart::value_objects::{LineKey, ProductId, Quantity};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

#[derive(Debug, FromRow)]
pub struct CartSessionEntity {
    pub id: Uuid,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl CartSessionEntity {
    pub fn into_domain(self) -> CartSession {
        CartSession {
            id: self.id,
            user_id: UserId::new(self.user_id),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub line_key: Uuid,
    pub product_id: i64,
    pub quantity: i64,
}

impl CartItemEntity {
    /// Rows violating the positive id/quantity invariants are reported
    /// instead of silently skipped.
    pub fn into_domain(self) -> Result<CartLineItem, RepositoryError> {
        Ok(CartLineItem {
            line_key: LineKey::new(self.line_key.to_string()),
            product_id: ProductId::try_from(self.product_id)
                .map_err(|_| RepositoryError::corrupted_record())?,
            quantity: Quantity::try_from(self.quantity)
                .map_err(|_| RepositoryError::corrupted_record())?,
        })
    }
}
