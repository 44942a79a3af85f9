use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{CartLineItem, CartSession};
use super::value_objects::{LineKey, ProductId, Quantity};

/// Port to the commerce subsystem that owns carts, sessions and customers.
///
/// Implementations decide how concurrent mutations of the same cart are
/// resolved; callers get no atomicity across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Whether the commerce subsystem is installed and active.
    async fn is_available(&self) -> bool;

    /// Returns the caller's cart session, creating session, customer binding
    /// and an empty cart when none exists yet.
    async fn ensure_session(&self, user_id: &UserId) -> Result<CartSession, RepositoryError>;

    /// Lines of the cart in the store's iteration order.
    async fn line_items(&self, session: &CartSession) -> Result<Vec<CartLineItem>, RepositoryError>;

    async fn add_line(
        &self,
        session: &CartSession,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<LineKey, RepositoryError>;

    async fn set_quantity(
        &self,
        session: &CartSession,
        line_key: &LineKey,
        quantity: Quantity,
    ) -> Result<(), RepositoryError>;

    async fn remove_line(
        &self,
        session: &CartSession,
        line_key: &LineKey,
    ) -> Result<(), RepositoryError>;

    /// Number of distinct lines in the cart.
    async fn item_count(&self, session: &CartSession) -> Result<u64, RepositoryError>;
}
