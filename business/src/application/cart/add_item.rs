use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{ADDED_MESSAGE, CartSummary, find_line};
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::add_item::{AddToCartParams, AddToCartUseCase};
use crate::domain::cart::value_objects::parse_line_request;
use crate::domain::catalog::repository::ProductCatalog;
use crate::domain::logger::Logger;

pub struct AddToCartUseCaseImpl {
    pub store: Arc<dyn CartStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddToCartUseCase for AddToCartUseCaseImpl {
    async fn execute(&self, params: AddToCartParams) -> Result<CartSummary, CartError> {
        if !self.store.is_available().await {
            self.logger
                .warn("Cart subsystem unavailable, rejecting add to cart");
            return Err(CartError::SubsystemUnavailable);
        }

        let (product_id, quantity) = parse_line_request(params.product_id, params.quantity)?;

        self.logger.info(&format!(
            "Adding {} x product {} to cart of {}",
            quantity, product_id, params.user_id
        ));

        if self.catalog.find_by_id(product_id).await?.is_none() {
            self.logger
                .warn(&format!("Product {} not found in catalog", product_id));
            return Err(CartError::ProductNotFound);
        }

        let session = self.store.ensure_session(&params.user_id).await?;
        let lines = self.store.line_items(&session).await?;

        match find_line(&lines, product_id) {
            Some(line) => {
                let merged = line.quantity.merged_with(quantity)?;
                self.store
                    .set_quantity(&session, &line.line_key, merged)
                    .await?;
                self.logger.info(&format!(
                    "Merged product {} into line {}, quantity now {}",
                    product_id, line.line_key, merged
                ));
            }
            None => {
                let line_key = self.store.add_line(&session, product_id, quantity).await?;
                self.logger.info(&format!(
                    "Added product {} as line {}",
                    product_id, line_key
                ));
            }
        }

        let item_count = self.store.item_count(&session).await?;
        Ok(CartSummary::succeeded(ADDED_MESSAGE, item_count))
    }
}
