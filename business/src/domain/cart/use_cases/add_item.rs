use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::value_objects::RawParam;
use crate::domain::shared::value_objects::UserId;

/// Raw request parameters; validation happens inside the use case so that
/// the subsystem availability check always comes first.
pub struct AddToCartParams {
    pub user_id: UserId,
    pub product_id: RawParam,
    pub quantity: RawParam,
}

#[async_trait]
pub trait AddToCartUseCase: Send + Sync {
    async fn execute(&self, params: AddToCartParams) -> Result<CartSummary, CartError>;
}
