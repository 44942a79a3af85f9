#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.subsystem_unavailable")]
    SubsystemUnavailable,
    #[error("cart.missing_parameters")]
    MissingParameters,
    #[error("cart.invalid_parameters")]
    InvalidParameters,
    #[error("cart.product_not_found")]
    ProductNotFound,
    #[error("cart.product_not_in_cart")]
    ProductNotInCart,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
