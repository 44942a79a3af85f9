use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, code, message) = match &self {
            CartError::SubsystemUnavailable => (
                StatusCode::NOT_FOUND,
                "cart_subsystem_unavailable",
                "The commerce subsystem is not installed or active",
            ),
            CartError::MissingParameters => (
                StatusCode::BAD_REQUEST,
                "missing_parameters",
                "Required parameters are missing or empty",
            ),
            CartError::InvalidParameters => (
                StatusCode::BAD_REQUEST,
                "invalid_parameters",
                "Product ID and quantity must be positive integers",
            ),
            CartError::ProductNotFound => (
                StatusCode::NOT_FOUND,
                "product_not_found",
                "Product not found",
            ),
            CartError::ProductNotInCart => (
                StatusCode::NOT_FOUND,
                "product_not_in_cart",
                "Product not found in cart",
            ),
            CartError::Repository(source) => {
                // Store details stay in the logs.
                tracing::error!("Cart store failure: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "cart_operation_failed",
                    "The cart operation could not be completed",
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_missing_parameters_to_bad_request() {
        let (status, json) = CartError::MissingParameters.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.code, "missing_parameters");
    }

    #[test]
    fn should_map_unavailable_subsystem_to_not_found() {
        let (status, json) = CartError::SubsystemUnavailable.into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.code, "cart_subsystem_unavailable");
    }

    #[test]
    fn should_map_product_not_in_cart_to_not_found() {
        let (status, json) = CartError::ProductNotInCart.into_error_response();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json.0.message, "Product not found in cart");
    }

    #[test]
    fn should_hide_store_details_behind_generic_failure() {
        let (status, json) =
            CartError::Repository(RepositoryError::DatabaseError).into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.code, "cart_operation_failed");
        assert!(!json.0.message.contains("database"));
    }
}
