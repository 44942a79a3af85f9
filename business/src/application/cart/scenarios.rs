use std::sync::Arc;

use proptest::prelude::*;

use crate::application::cart::add_item::AddToCartUseCaseImpl;
use crate::application::cart::get_contents::GetCartContentsUseCaseImpl;
use crate::application::cart::in_memory::{InMemoryCartStore, InMemoryCatalog};
use crate::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use crate::application::cart::update_item::UpdateCartItemUseCaseImpl;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::use_cases::add_item::{AddToCartParams, AddToCartUseCase};
use crate::domain::cart::use_cases::get_contents::{
    GetCartContentsParams, GetCartContentsUseCase,
};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::cart::use_cases::update_item::{UpdateCartItemParams, UpdateCartItemUseCase};
use crate::domain::logger::{Logger, MockLogger};
use crate::domain::shared::value_objects::UserId;

fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLogger::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

struct Cart {
    store: Arc<InMemoryCartStore>,
    add: AddToCartUseCaseImpl,
    update: UpdateCartItemUseCaseImpl,
    remove: RemoveCartItemUseCaseImpl,
    contents: GetCartContentsUseCaseImpl,
}

impl Cart {
    fn with_catalog(ids: impl IntoIterator<Item = i64>) -> Self {
        let store = Arc::new(InMemoryCartStore::default());
        let catalog = Arc::new(InMemoryCatalog::with_products(ids));
        let logger = mock_logger();
        Self {
            add: AddToCartUseCaseImpl {
                store: store.clone(),
                catalog,
                logger: logger.clone(),
            },
            update: UpdateCartItemUseCaseImpl {
                store: store.clone(),
                logger: logger.clone(),
            },
            remove: RemoveCartItemUseCaseImpl {
                store: store.clone(),
                logger: logger.clone(),
            },
            contents: GetCartContentsUseCaseImpl {
                store: store.clone(),
                logger,
            },
            store,
        }
    }

    async fn add(&self, product_id: i64, quantity: i64) -> Result<u64, CartError> {
        self.add
            .execute(AddToCartParams {
                user_id: user(),
                product_id: product_id.into(),
                quantity: quantity.into(),
            })
            .await
            .map(|summary| summary.item_count)
    }

    async fn update(&self, product_id: i64, quantity: i64) -> Result<u64, CartError> {
        self.update
            .execute(UpdateCartItemParams {
                user_id: user(),
                product_id: product_id.into(),
                quantity: quantity.into(),
            })
            .await
            .map(|summary| summary.item_count)
    }

    async fn remove(&self, product_id: i64) -> Result<u64, CartError> {
        self.remove
            .execute(RemoveCartItemParams {
                user_id: user(),
                product_id: product_id.into(),
            })
            .await
            .map(|summary| summary.item_count)
    }

    fn quantity_of(&self, product_id: i64) -> Option<u32> {
        self.store
            .lines_of(&user())
            .iter()
            .find(|line| line.product_id.value() == product_id)
            .map(|line| line.quantity.value())
    }
}

fn user() -> UserId {
    UserId::new("scenario-user")
}

#[tokio::test]
async fn should_follow_add_merge_update_remove_lifecycle() {
    let cart = Cart::with_catalog([42]);

    assert_eq!(cart.add(42, 2).await.unwrap(), 1);

    assert_eq!(cart.add(42, 3).await.unwrap(), 1);
    assert_eq!(cart.quantity_of(42), Some(5));

    assert_eq!(cart.update(42, 1).await.unwrap(), 1);
    assert_eq!(cart.quantity_of(42), Some(1));

    assert_eq!(cart.remove(42).await.unwrap(), 0);
    assert_eq!(cart.quantity_of(42), None);
}

#[tokio::test]
async fn should_leave_cart_unchanged_when_product_missing_from_catalog() {
    let cart = Cart::with_catalog([42]);
    cart.add(42, 1).await.unwrap();

    let result = cart.add(9999, 1).await;

    assert!(matches!(result, Err(CartError::ProductNotFound)));
    assert_eq!(cart.store.lines_of(&user()).len(), 1);
}

#[tokio::test]
async fn should_leave_cart_unchanged_when_updating_absent_product() {
    let cart = Cart::with_catalog([42, 7]);
    cart.add(7, 2).await.unwrap();

    let result = cart.update(42, 3).await;

    assert!(matches!(result, Err(CartError::ProductNotInCart)));
    assert_eq!(cart.store.lines_of(&user()).len(), 1);
    assert_eq!(cart.quantity_of(7), Some(2));
}

#[tokio::test]
async fn should_fail_second_removal_of_same_product() {
    let cart = Cart::with_catalog([42, 7]);
    cart.add(42, 1).await.unwrap();
    cart.add(7, 1).await.unwrap();

    assert_eq!(cart.remove(42).await.unwrap(), 1);
    let second = cart.remove(42).await;

    assert!(matches!(second, Err(CartError::ProductNotInCart)));
}

#[tokio::test]
async fn should_hide_removed_product_from_listing() {
    let cart = Cart::with_catalog([42, 7]);
    cart.add(42, 1).await.unwrap();
    cart.add(7, 1).await.unwrap();

    cart.remove(42).await.unwrap();
    let contents = cart
        .contents
        .execute(GetCartContentsParams { user_id: user() })
        .await
        .unwrap();

    assert_eq!(contents.item_count, 1);
    assert!(
        contents
            .items
            .iter()
            .all(|line| line.product_id.value() != 42)
    );
}

#[tokio::test]
async fn should_keep_carts_of_different_users_apart() {
    let cart = Cart::with_catalog([42]);
    cart.add(42, 1).await.unwrap();

    let other = cart
        .contents
        .execute(GetCartContentsParams {
            user_id: UserId::new("someone-else"),
        })
        .await
        .unwrap();

    assert_eq!(other.item_count, 0);
}

proptest! {
    #[test]
    fn should_sum_quantities_when_adding_same_product_twice(
        product_id in 1i64..100_000,
        first in 1i64..10_000,
        second in 1i64..10_000,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (count, quantity) = runtime.block_on(async {
            let cart = Cart::with_catalog([product_id]);
            cart.add(product_id, first).await.unwrap();
            let count = cart.add(product_id, second).await.unwrap();
            (count, cart.quantity_of(product_id))
        });

        prop_assert_eq!(count, 1);
        prop_assert_eq!(quantity, Some((first + second) as u32));
    }

    #[test]
    fn should_reject_zero_quantity_regardless_of_cart_state(
        product_id in 1i64..100_000,
        preloaded in proptest::collection::vec(1i64..100, 0..5),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let result = runtime.block_on(async {
            let cart = Cart::with_catalog(preloaded.iter().copied().chain([product_id]));
            for id in &preloaded {
                cart.add(*id, 1).await.unwrap();
            }
            cart.add(product_id, 0).await
        });

        prop_assert!(matches!(result, Err(CartError::MissingParameters)));
    }
}
