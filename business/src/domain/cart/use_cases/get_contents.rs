use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartContents;
use crate::domain::shared::value_objects::UserId;

pub struct GetCartContentsParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait GetCartContentsUseCase: Send + Sync {
    async fn execute(&self, params: GetCartContentsParams) -> Result<CartContents, CartError>;
}
