use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::cart::use_cases::add_item::{AddToCartParams, AddToCartUseCase};
use business::domain::cart::use_cases::get_contents::{
    GetCartContentsParams, GetCartContentsUseCase,
};
use business::domain::cart::use_cases::remove_item::{
    RemoveCartItemParams, RemoveCartItemUseCase,
};
use business::domain::cart::use_cases::update_item::{
    UpdateCartItemParams, UpdateCartItemUseCase,
};

use crate::api::cart::dto::{
    AddToCartRequest, CartContentsResponse, CartSummaryResponse, RemoveCartItemRequest,
    UpdateCartItemRequest,
};
use crate::api::cart::payload::CartParams;
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::CartReader;
use crate::api::tags::ApiTags;

pub struct CartApi {
    add_use_case: Arc<dyn AddToCartUseCase>,
    update_use_case: Arc<dyn UpdateCartItemUseCase>,
    remove_use_case: Arc<dyn RemoveCartItemUseCase>,
    contents_use_case: Arc<dyn GetCartContentsUseCase>,
}

impl CartApi {
    pub fn new(
        add_use_case: Arc<dyn AddToCartUseCase>,
        update_use_case: Arc<dyn UpdateCartItemUseCase>,
        remove_use_case: Arc<dyn RemoveCartItemUseCase>,
        contents_use_case: Arc<dyn GetCartContentsUseCase>,
    ) -> Self {
        Self {
            add_use_case,
            update_use_case,
            remove_use_case,
            contents_use_case,
        }
    }
}

/// Cart API
///
/// Mutates the cart of the authenticated caller. Every endpoint requires a
/// bearer token carrying the `read` capability.
#[OpenApi(prefix_path = "/cart/v1")]
impl CartApi {
    /// Add a product to the cart
    ///
    /// Adds a new line, or increases the quantity of the line already holding
    /// the product.
    #[oai(path = "/add-to-cart", method = "post", tag = "ApiTags::Cart")]
    async fn add_to_cart(
        &self,
        auth: CartReader,
        body: CartParams<AddToCartRequest>,
    ) -> AddToCartResponse {
        let params = AddToCartParams {
            user_id: auth.0.user_id,
            product_id: body.param("product_id"),
            quantity: body.param("quantity"),
        };

        match self.add_use_case.execute(params).await {
            Ok(summary) => AddToCartResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddToCartResponse::BadRequest(json),
                    404 => AddToCartResponse::NotFound(json),
                    _ => AddToCartResponse::InternalError(json),
                }
            }
        }
    }

    /// Update the quantity of a cart line
    ///
    /// Replaces the quantity of the line holding the product.
    #[oai(path = "/update-cart-item", method = "put", tag = "ApiTags::Cart")]
    async fn update_cart_item(
        &self,
        auth: CartReader,
        body: CartParams<UpdateCartItemRequest>,
    ) -> UpdateCartItemResponse {
        let params = UpdateCartItemParams {
            user_id: auth.0.user_id,
            product_id: body.param("product_id"),
            quantity: body.param("quantity"),
        };

        match self.update_use_case.execute(params).await {
            Ok(summary) => UpdateCartItemResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateCartItemResponse::BadRequest(json),
                    404 => UpdateCartItemResponse::NotFound(json),
                    _ => UpdateCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a product from the cart
    #[oai(path = "/remove-cart-item", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_cart_item(
        &self,
        auth: CartReader,
        body: CartParams<RemoveCartItemRequest>,
    ) -> RemoveCartItemResponse {
        let params = RemoveCartItemParams {
            user_id: auth.0.user_id,
            product_id: body.param("product_id"),
        };

        match self.remove_use_case.execute(params).await {
            Ok(summary) => RemoveCartItemResponse::Ok(Json(summary.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => RemoveCartItemResponse::BadRequest(json),
                    404 => RemoveCartItemResponse::NotFound(json),
                    _ => RemoveCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// List the cart
    ///
    /// Returns the caller's cart lines in insertion order.
    #[oai(path = "/cart-contents", method = "get", tag = "ApiTags::Cart")]
    async fn cart_contents(&self, auth: CartReader) -> CartContentsApiResponse {
        let params = GetCartContentsParams {
            user_id: auth.0.user_id,
        };

        match self.contents_use_case.execute(params).await {
            Ok(contents) => CartContentsApiResponse::Ok(Json(contents.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => CartContentsApiResponse::NotFound(json),
                    _ => CartContentsApiResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddToCartResponse {
    #[oai(status = 200)]
    Ok(Json<CartSummaryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartSummaryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RemoveCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartSummaryResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartContentsApiResponse {
    #[oai(status = 200)]
    Ok(Json<CartContentsResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::{Endpoint, EndpointExt, Route};
    use poem_openapi::OpenApiService;
    use serde_json::json;

    use business::domain::cart::errors::CartError;
    use business::domain::cart::model::{
        ADDED_MESSAGE, CartContents, CartLineItem, CartSummary, REMOVED_MESSAGE,
    };
    use business::domain::cart::value_objects::{LineKey, ProductId, Quantity, RawParam};

    use crate::api::security::missing_credentials;
    use crate::api::security::tests::{TEST_SECRET, reader_token, test_verifier, token_with};

    mock! {
        pub AddUseCase {}

        #[async_trait]
        impl AddToCartUseCase for AddUseCase {
            async fn execute(&self, params: AddToCartParams) -> Result<CartSummary, CartError>;
        }
    }

    mock! {
        pub UpdateUseCase {}

        #[async_trait]
        impl UpdateCartItemUseCase for UpdateUseCase {
            async fn execute(&self, params: UpdateCartItemParams) -> Result<CartSummary, CartError>;
        }
    }

    mock! {
        pub RemoveUseCase {}

        #[async_trait]
        impl RemoveCartItemUseCase for RemoveUseCase {
            async fn execute(&self, params: RemoveCartItemParams) -> Result<CartSummary, CartError>;
        }
    }

    mock! {
        pub ContentsUseCase {}

        #[async_trait]
        impl GetCartContentsUseCase for ContentsUseCase {
            async fn execute(&self, params: GetCartContentsParams) -> Result<CartContents, CartError>;
        }
    }

    struct Mocks {
        add: MockAddUseCase,
        update: MockUpdateUseCase,
        remove: MockRemoveUseCase,
        contents: MockContentsUseCase,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                add: MockAddUseCase::new(),
                update: MockUpdateUseCase::new(),
                remove: MockRemoveUseCase::new(),
                contents: MockContentsUseCase::new(),
            }
        }

        fn into_app(self) -> impl Endpoint {
            let api = CartApi::new(
                Arc::new(self.add),
                Arc::new(self.update),
                Arc::new(self.remove),
                Arc::new(self.contents),
            );
            let service = OpenApiService::new(api, "Cart Adapter API", "test");
            Route::new()
                .nest("/", service)
                .catch_error(missing_credentials)
                .data(Arc::new(test_verifier(None)))
        }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    #[tokio::test]
    async fn should_add_to_cart_for_authorized_reader() {
        // Arrange
        let mut mocks = Mocks::new();
        mocks
            .add
            .expect_execute()
            .withf(|params| {
                params.user_id.as_str() == "user-42"
                    && params.product_id == RawParam::Integer(42)
                    && params.quantity == RawParam::Integer(2)
            })
            .times(1)
            .returning(|_| Ok(CartSummary::succeeded(ADDED_MESSAGE, 1)));
        let client = TestClient::new(mocks.into_app());

        // Act
        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": 42, "quantity": 2 }))
            .send()
            .await;

        // Assert
        response.assert_status_is_ok();
        response
            .assert_json(json!({
                "success": true,
                "message": ADDED_MESSAGE,
                "cart_contents_count": 1
            }))
            .await;
    }

    #[tokio::test]
    async fn should_reject_request_without_token_before_handler_runs() {
        let mut mocks = Mocks::new();
        mocks.add.expect_execute().never();
        let client = TestClient::new(mocks.into_app());

        let response = client
            .post("/cart/v1/add-to-cart")
            .body_json(&json!({ "product_id": 42, "quantity": 2 }))
            .send()
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response
            .assert_json(json!({
                "code": "unauthorized",
                "message": "A valid bearer token is required"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_reject_non_bearer_credentials_with_envelope() {
        let mut mocks = Mocks::new();
        mocks.contents.expect_execute().never();
        let client = TestClient::new(mocks.into_app());

        let response = client
            .get("/cart/v1/cart-contents")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .send()
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let json = response.json().await;
        json.value()
            .object()
            .get("code")
            .assert_string("unauthorized");
    }

    #[tokio::test]
    async fn should_reject_invalid_token_with_unauthorized() {
        let mut mocks = Mocks::new();
        mocks.add.expect_execute().never();
        let client = TestClient::new(mocks.into_app());
        let forged = token_with("user-42", &["read"], None, "not-the-secret", 3600);

        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&forged))
            .body_json(&json!({ "product_id": 42, "quantity": 2 }))
            .send()
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response
            .assert_json(json!({
                "code": "unauthorized",
                "message": "A valid bearer token is required"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_forbid_caller_without_read_capability() {
        let mut mocks = Mocks::new();
        mocks.remove.expect_execute().never();
        let client = TestClient::new(mocks.into_app());
        let token = token_with("user-42", &[], None, TEST_SECRET, 3600);

        let response = client
            .delete("/cart/v1/remove-cart-item")
            .header("Authorization", bearer(&token))
            .body_json(&json!({ "product_id": 42 }))
            .send()
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        response
            .assert_json(json!({
                "code": "forbidden",
                "message": "Sorry, you are not allowed to do that"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_answer_bad_request_when_parameters_missing() {
        let mut mocks = Mocks::new();
        mocks
            .add
            .expect_execute()
            .withf(|params| {
                params.product_id == RawParam::Absent && params.quantity == RawParam::Integer(1)
            })
            .returning(|_| Err(CartError::MissingParameters));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "quantity": 1 }))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value()
            .object()
            .get("code")
            .assert_string("missing_parameters");
    }

    #[tokio::test]
    async fn should_pass_request_without_body_to_use_case_as_absent_parameters() {
        let mut mocks = Mocks::new();
        mocks
            .add
            .expect_execute()
            .withf(|params| {
                params.product_id == RawParam::Absent && params.quantity == RawParam::Absent
            })
            .times(1)
            .returning(|_| Err(CartError::MissingParameters));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&reader_token("user-42")))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response
            .assert_json(json!({
                "code": "missing_parameters",
                "message": "Required parameters are missing or empty"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_report_disabled_subsystem_for_request_without_body() {
        let mut mocks = Mocks::new();
        mocks
            .remove
            .expect_execute()
            .withf(|params| params.product_id == RawParam::Absent)
            .times(1)
            .returning(|_| Err(CartError::SubsystemUnavailable));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .delete("/cart/v1/remove-cart-item")
            .header("Authorization", bearer(&reader_token("user-42")))
            .send()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json = response.json().await;
        json.value()
            .object()
            .get("code")
            .assert_string("cart_subsystem_unavailable");
    }

    #[tokio::test]
    async fn should_answer_invalid_parameters_for_non_numeric_product_id() {
        let mut mocks = Mocks::new();
        mocks
            .update
            .expect_execute()
            .withf(|params| {
                params.product_id == RawParam::Malformed && params.quantity == RawParam::Integer(1)
            })
            .times(1)
            .returning(|_| Err(CartError::InvalidParameters));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .put("/cart/v1/update-cart-item")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": "abc", "quantity": 1 }))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response
            .assert_json(json!({
                "code": "invalid_parameters",
                "message": "Product ID and quantity must be positive integers"
            }))
            .await;
    }

    #[tokio::test]
    async fn should_accept_numeric_strings_as_parameters() {
        let mut mocks = Mocks::new();
        mocks
            .add
            .expect_execute()
            .withf(|params| {
                params.product_id == RawParam::Integer(42) && params.quantity == RawParam::Integer(2)
            })
            .times(1)
            .returning(|_| Ok(CartSummary::succeeded(ADDED_MESSAGE, 1)));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": "42", "quantity": "2" }))
            .send()
            .await;

        response.assert_status_is_ok();
    }

    #[tokio::test]
    async fn should_answer_not_found_when_updating_product_not_in_cart() {
        let mut mocks = Mocks::new();
        mocks
            .update
            .expect_execute()
            .returning(|_| Err(CartError::ProductNotInCart));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .put("/cart/v1/update-cart-item")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": 42, "quantity": 3 }))
            .send()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json = response.json().await;
        json.value()
            .object()
            .get("code")
            .assert_string("product_not_in_cart");
    }

    #[tokio::test]
    async fn should_answer_not_found_when_commerce_subsystem_disabled() {
        let mut mocks = Mocks::new();
        mocks
            .contents
            .expect_execute()
            .returning(|_| Err(CartError::SubsystemUnavailable));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .get("/cart/v1/cart-contents")
            .header("Authorization", bearer(&reader_token("user-42")))
            .send()
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_remove_cart_item_with_json_body() {
        let mut mocks = Mocks::new();
        mocks
            .remove
            .expect_execute()
            .withf(|params| params.product_id == RawParam::Integer(42))
            .returning(|_| Ok(CartSummary::succeeded(REMOVED_MESSAGE, 0)));
        let client = TestClient::new(mocks.into_app());

        let response = client
            .delete("/cart/v1/remove-cart-item")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": 42 }))
            .send()
            .await;

        response.assert_status_is_ok();
        response
            .assert_json(json!({
                "success": true,
                "message": REMOVED_MESSAGE,
                "cart_contents_count": 0
            }))
            .await;
    }

    #[tokio::test]
    async fn should_list_cart_contents() {
        let mut mocks = Mocks::new();
        mocks.contents.expect_execute().returning(|_| {
            Ok(CartContents {
                items: vec![CartLineItem {
                    line_key: LineKey::new("line-1"),
                    product_id: ProductId::try_from(42).unwrap(),
                    quantity: Quantity::try_from(5).unwrap(),
                }],
                item_count: 1,
            })
        });
        let client = TestClient::new(mocks.into_app());

        let response = client
            .get("/cart/v1/cart-contents")
            .header("Authorization", bearer(&reader_token("user-42")))
            .send()
            .await;

        response.assert_status_is_ok();
        response
            .assert_json(json!({
                "items": [{ "line_key": "line-1", "product_id": 42, "quantity": 5 }],
                "cart_contents_count": 1
            }))
            .await;
    }

    #[tokio::test]
    async fn should_hide_store_failure_behind_generic_error() {
        let mut mocks = Mocks::new();
        mocks.add.expect_execute().returning(|_| {
            Err(CartError::Repository(
                business::domain::errors::RepositoryError::DatabaseError,
            ))
        });
        let client = TestClient::new(mocks.into_app());

        let response = client
            .post("/cart/v1/add-to-cart")
            .header("Authorization", bearer(&reader_token("user-42")))
            .body_json(&json!({ "product_id": 42, "quantity": 1 }))
            .send()
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response
            .assert_json(json!({
                "code": "cart_operation_failed",
                "message": "The cart operation could not be completed"
            }))
            .await;
    }
}
