use poem_openapi::Object;

use business::domain::cart::model::{CartContents, CartLineItem, CartSummary};

/// Documents the request body. Fields are read leniently (numeric strings
/// are accepted) so absent or malformed values reach validation and come
/// back as `missing_parameters` or `invalid_parameters`.
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct AddToCartRequest {
    /// Catalog product to add
    pub product_id: Option<i64>,
    /// Units to add; merged into an existing line
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct UpdateCartItemRequest {
    /// Product whose line is updated
    pub product_id: Option<i64>,
    /// New quantity of the line
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct RemoveCartItemRequest {
    /// Product whose line is removed
    pub product_id: Option<i64>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct CartSummaryResponse {
    pub success: bool,
    pub message: String,
    /// Number of distinct lines in the cart
    pub cart_contents_count: u64,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            success: summary.success,
            message: summary.message,
            cart_contents_count: summary.item_count,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct CartLineResponse {
    pub line_key: String,
    pub product_id: i64,
    pub quantity: u32,
}

impl From<CartLineItem> for CartLineResponse {
    fn from(line: CartLineItem) -> Self {
        Self {
            line_key: line.line_key.to_string(),
            product_id: line.product_id.value(),
            quantity: line.quantity.value(),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "snake_case")]
pub struct CartContentsResponse {
    pub items: Vec<CartLineResponse>,
    pub cart_contents_count: u64,
}

impl From<CartContents> for CartContentsResponse {
    fn from(contents: CartContents) -> Self {
        Self {
            items: contents.items.into_iter().map(Into::into).collect(),
            cart_contents_count: contents.item_count,
        }
    }
}
