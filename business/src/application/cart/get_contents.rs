use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartContents;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::get_contents::{
    GetCartContentsParams, GetCartContentsUseCase,
};
use crate::domain::logger::Logger;

pub struct GetCartContentsUseCaseImpl {
    pub store: Arc<dyn CartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartContentsUseCase for GetCartContentsUseCaseImpl {
    async fn execute(&self, params: GetCartContentsParams) -> Result<CartContents, CartError> {
        if !self.store.is_available().await {
            self.logger
                .warn("Cart subsystem unavailable, rejecting cart listing");
            return Err(CartError::SubsystemUnavailable);
        }

        self.logger
            .debug(&format!("Listing cart of {}", params.user_id));

        let session = self.store.ensure_session(&params.user_id).await?;
        let items = self.store.line_items(&session).await?;
        let item_count = self.store.item_count(&session).await?;

        Ok(CartContents { items, item_count })
    }
}
