//! Stateful fakes of the cart and catalog ports, used to exercise the use
//! cases end to end.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::model::{CartLineItem, CartSession};
use crate::domain::cart::store::CartStore;
use crate::domain::cart::value_objects::{LineKey, ProductId, Quantity};
use crate::domain::catalog::model::Product;
use crate::domain::catalog::repository::ProductCatalog;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

#[derive(Default)]
pub struct InMemoryCartStore {
    carts: Mutex<HashMap<UserId, (CartSession, Vec<CartLineItem>)>>,
    next_key: AtomicU64,
}

impl InMemoryCartStore {
    pub fn lines_of(&self, user_id: &UserId) -> Vec<CartLineItem> {
        self.carts
            .lock()
            .unwrap()
            .get(user_id)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default()
    }

    fn with_lines<T>(
        &self,
        session: &CartSession,
        f: impl FnOnce(&mut Vec<CartLineItem>) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let (_, lines) = carts
            .get_mut(&session.user_id)
            .ok_or(RepositoryError::NotFound)?;
        f(lines)
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn is_available(&self) -> bool {
        true
    }

    async fn ensure_session(&self, user_id: &UserId) -> Result<CartSession, RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let (session, _) = carts.entry(user_id.clone()).or_insert_with(|| {
            let session = CartSession {
                id: Uuid::new_v4(),
                user_id: user_id.clone(),
                created_at: chrono::Utc::now(),
            };
            (session, Vec::new())
        });
        Ok(session.clone())
    }

    async fn line_items(&self, session: &CartSession) -> Result<Vec<CartLineItem>, RepositoryError> {
        self.with_lines(session, |lines| Ok(lines.clone()))
    }

    async fn add_line(
        &self,
        session: &CartSession,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<LineKey, RepositoryError> {
        let key = LineKey::new(format!(
            "line-{}",
            self.next_key.fetch_add(1, Ordering::SeqCst)
        ));
        self.with_lines(session, |lines| {
            lines.push(CartLineItem {
                line_key: key.clone(),
                product_id,
                quantity,
            });
            Ok(key)
        })
    }

    async fn set_quantity(
        &self,
        session: &CartSession,
        line_key: &LineKey,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        self.with_lines(session, |lines| {
            let line = lines
                .iter_mut()
                .find(|line| &line.line_key == line_key)
                .ok_or(RepositoryError::NotFound)?;
            line.quantity = quantity;
            Ok(())
        })
    }

    async fn remove_line(
        &self,
        session: &CartSession,
        line_key: &LineKey,
    ) -> Result<(), RepositoryError> {
        self.with_lines(session, |lines| {
            let before = lines.len();
            lines.retain(|line| &line.line_key != line_key);
            if lines.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }

    async fn item_count(&self, session: &CartSession) -> Result<u64, RepositoryError> {
        self.with_lines(session, |lines| Ok(lines.len() as u64))
    }
}

pub struct InMemoryCatalog {
    products: HashSet<i64>,
}

impl InMemoryCatalog {
    pub fn with_products(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            products: ids.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products.contains(&id.value()).then(|| Product {
            id,
            name: format!("Product {}", id),
        }))
    }
}
