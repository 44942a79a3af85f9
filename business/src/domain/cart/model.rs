use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::shared::value_objects::UserId;

use super::value_objects::{LineKey, ProductId, Quantity};

pub const ADDED_MESSAGE: &str = "Product added or updated in cart";
pub const UPDATED_MESSAGE: &str = "Product quantity updated in cart";
pub const REMOVED_MESSAGE: &str = "Product removed from cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub line_key: LineKey,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Cart of one user, lazily created by the store on first access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a successful cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub success: bool,
    pub message: String,
    /// Number of distinct lines in the cart after the mutation.
    pub item_count: u64,
}

impl CartSummary {
    pub fn succeeded(message: impl Into<String>, item_count: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            item_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartContents {
    pub items: Vec<CartLineItem>,
    pub item_count: u64,
}

/// First line holding `product_id`, in the store's iteration order.
pub fn find_line(items: &[CartLineItem], product_id: ProductId) -> Option<&CartLineItem> {
    items.iter().find(|item| item.product_id == product_id)
}
