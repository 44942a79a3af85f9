use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::value_objects::RawParam;
use crate::domain::shared::value_objects::UserId;

pub struct UpdateCartItemParams {
    pub user_id: UserId,
    pub product_id: RawParam,
    pub quantity: RawParam,
}

#[async_trait]
pub trait UpdateCartItemUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCartItemParams) -> Result<CartSummary, CartError>;
}
