use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::{CartLineItem, CartSession};
use business::domain::cart::store::CartStore;
use business::domain::cart::value_objects::{LineKey, ProductId, Quantity};
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use super::entity::{CartItemEntity, CartSessionEntity};
use crate::database_error;

/// Cart store on PostgreSQL. One session row per user, lines ordered by
/// insertion. Concurrent writers to the same line are last-write-wins.
pub struct CartStorePostgres {
    pool: PgPool,
    enabled: bool,
}

impl CartStorePostgres {
    pub fn new(pool: PgPool, enabled: bool) -> Self {
        Self { pool, enabled }
    }
}

/// Line keys handed out by this store are UUIDs; anything else cannot
/// name one of our rows.
fn parse_line_key(line_key: &LineKey) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(line_key.as_str()).map_err(|_| RepositoryError::not_found())
}

#[async_trait]
impl CartStore for CartStorePostgres {
    async fn is_available(&self) -> bool {
        self.enabled && !self.pool.is_closed()
    }

    async fn ensure_session(&self, user_id: &UserId) -> Result<CartSession, RepositoryError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let entity = sqlx::query_as::<_, CartSessionEntity>(
            r#"INSERT INTO cart_sessions (id, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id.as_str())
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(entity.into_domain())
    }

    async fn line_items(&self, session: &CartSession) -> Result<Vec<CartLineItem>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartItemEntity>(
            "SELECT line_key, product_id, quantity FROM cart_items WHERE session_id = $1 ORDER BY position",
        )
        .bind(session.id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        entities.into_iter().map(|e| e.into_domain()).collect()
    }

    async fn add_line(
        &self,
        session: &CartSession,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<LineKey, RepositoryError> {
        let line_key = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO cart_items (line_key, session_id, product_id, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(line_key)
        .bind(session.id)
        .bind(product_id.value())
        .bind(i64::from(quantity.value()))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(LineKey::new(line_key.to_string()))
    }

    async fn set_quantity(
        &self,
        session: &CartSession,
        line_key: &LineKey,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $1 WHERE line_key = $2 AND session_id = $3",
        )
        .bind(i64::from(quantity.value()))
        .bind(parse_line_key(line_key)?)
        .bind(session.id)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found());
        }
        Ok(())
    }

    async fn remove_line(
        &self,
        session: &CartSession,
        line_key: &LineKey,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE line_key = $1 AND session_id = $2")
            .bind(parse_line_key(line_key)?)
            .bind(session.id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found());
        }
        Ok(())
    }

    async fn item_count(&self, session: &CartSession) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE session_id = $1")
            .bind(session.id)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        u64::try_from(count).map_err(|_| RepositoryError::corrupted_record())
    }
}
