use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartSummary, UPDATED_MESSAGE, find_line};
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::update_item::{UpdateCartItemParams, UpdateCartItemUseCase};
use crate::domain::cart::value_objects::parse_line_request;
use crate::domain::logger::Logger;

pub struct UpdateCartItemUseCaseImpl {
    pub store: Arc<dyn CartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemUseCase for UpdateCartItemUseCaseImpl {
    async fn execute(&self, params: UpdateCartItemParams) -> Result<CartSummary, CartError> {
        if !self.store.is_available().await {
            self.logger
                .warn("Cart subsystem unavailable, rejecting cart item update");
            return Err(CartError::SubsystemUnavailable);
        }

        let (product_id, quantity) = parse_line_request(params.product_id, params.quantity)?;

        self.logger.info(&format!(
            "Setting quantity of product {} to {} in cart of {}",
            product_id, quantity, params.user_id
        ));

        let session = self.store.ensure_session(&params.user_id).await?;
        let lines = self.store.line_items(&session).await?;

        let Some(line) = find_line(&lines, product_id) else {
            self.logger
                .info(&format!("Product {} is not in the cart", product_id));
            return Err(CartError::ProductNotInCart);
        };

        // Overwrite, unlike add which merges.
        self.store
            .set_quantity(&session, &line.line_key, quantity)
            .await?;

        let item_count = self.store.item_count(&session).await?;
        Ok(CartSummary::succeeded(UPDATED_MESSAGE, item_count))
    }
}
