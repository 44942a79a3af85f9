use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartSummary, REMOVED_MESSAGE, find_line};
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::cart::value_objects::ProductId;
use crate::domain::logger::Logger;

pub struct RemoveCartItemUseCaseImpl {
    pub store: Arc<dyn CartStore>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartSummary, CartError> {
        if !self.store.is_available().await {
            self.logger
                .warn("Cart subsystem unavailable, rejecting cart item removal");
            return Err(CartError::SubsystemUnavailable);
        }

        let product_id = ProductId::parse(params.product_id)?;

        self.logger.info(&format!(
            "Removing product {} from cart of {}",
            product_id, params.user_id
        ));

        let session = self.store.ensure_session(&params.user_id).await?;
        let lines = self.store.line_items(&session).await?;

        let Some(line) = find_line(&lines, product_id) else {
            self.logger
                .info(&format!("Product {} is not in the cart", product_id));
            return Err(CartError::ProductNotInCart);
        };

        self.store.remove_line(&session, &line.line_key).await?;
        self.logger
            .info(&format!("Removed line {}", line.line_key));

        let item_count = self.store.item_count(&session).await?;
        Ok(CartSummary::succeeded(REMOVED_MESSAGE, item_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::{CartLineItem, CartSession};
    use crate::domain::cart::store::MockCartStore;
    use crate::domain::cart::value_objects::{LineKey, Quantity, RawParam};
    use crate::domain::errors::RepositoryError;
    use crate::domain::logger::MockLogger;
    use crate::domain::shared::value_objects::UserId;
    use uuid::Uuid;

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLogger::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn test_session() -> CartSession {
        CartSession {
            id: Uuid::new_v4(),
            user_id: UserId::new("test-user-id"),
            created_at: chrono::Utc::now(),
        }
    }

    fn line(key: &str, product_id: i64) -> CartLineItem {
        CartLineItem {
            line_key: LineKey::new(key),
            product_id: ProductId::try_from(product_id).unwrap(),
            quantity: Quantity::try_from(1).unwrap(),
        }
    }

    fn params(product_id: Option<i64>) -> RemoveCartItemParams {
        RemoveCartItemParams {
            user_id: UserId::new("test-user-id"),
            product_id: product_id.into(),
        }
    }

    #[tokio::test]
    async fn should_remove_first_matching_line() {
        let mut store = MockCartStore::new();
        store.expect_is_available().returning(|| true);
        store
            .expect_ensure_session()
            .returning(|_| Ok(test_session()));
        store
            .expect_line_items()
            .returning(|_| Ok(vec![line("line-7", 7), line("line-42", 42)]));
        store
            .expect_remove_line()
            .withf(|_, key| key.as_str() == "line-42")
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_item_count().returning(|_| Ok(1));

        let use_case = RemoveCartItemUseCaseImpl {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(Some(42))).await;

        let summary = result.unwrap();
        assert_eq!(summary.message, REMOVED_MESSAGE);
        assert_eq!(summary.item_count, 1);
    }

    #[tokio::test]
    async fn should_return_product_not_in_cart_when_absent() {
        let mut store = MockCartStore::new();
        store.expect_is_available().returning(|| true);
        store
            .expect_ensure_session()
            .returning(|_| Ok(test_session()));
        store.expect_line_items().returning(|_| Ok(vec![]));
        store.expect_remove_line().never();

        let use_case = RemoveCartItemUseCaseImpl {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(Some(42))).await;

        assert!(matches!(result.unwrap_err(), CartError::ProductNotInCart));
    }

    #[tokio::test]
    async fn should_return_missing_parameters_when_product_id_absent() {
        let mut store = MockCartStore::new();
        store.expect_is_available().returning(|| true);
        store.expect_ensure_session().never();

        let use_case = RemoveCartItemUseCaseImpl {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(None)).await;

        assert!(matches!(result.unwrap_err(), CartError::MissingParameters));
    }

    #[tokio::test]
    async fn should_reject_malformed_product_id() {
        let mut store = MockCartStore::new();
        store.expect_is_available().returning(|| true);
        store.expect_ensure_session().never();

        let use_case = RemoveCartItemUseCaseImpl {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(RemoveCartItemParams {
                user_id: UserId::new("test-user-id"),
                product_id: RawParam::Malformed,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidParameters));
    }

    #[tokio::test]
    async fn should_propagate_failure_from_remove_line() {
        let mut store = MockCartStore::new();
        store.expect_is_available().returning(|| true);
        store
            .expect_ensure_session()
            .returning(|_| Ok(test_session()));
        store
            .expect_line_items()
            .returning(|_| Ok(vec![line("line-42", 42)]));
        store
            .expect_remove_line()
            .returning(|_, _| Err(RepositoryError::DatabaseError));
        store.expect_item_count().never();

        let use_case = RemoveCartItemUseCaseImpl {
            store: Arc::new(store),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(Some(42))).await;

        assert!(matches!(result.unwrap_err(), CartError::Repository(_)));
    }
}
