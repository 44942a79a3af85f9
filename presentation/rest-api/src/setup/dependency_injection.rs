use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::store::CartStorePostgres;
use persistence::catalog::repository::ProductCatalogPostgres;

use business::application::cart::add_item::AddToCartUseCaseImpl;
use business::application::cart::get_contents::GetCartContentsUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::update_item::UpdateCartItemUseCaseImpl;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::HealthApi;
use crate::api::security::TokenVerifier;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub cart_api: CartApi,
    pub token_verifier: Arc<TokenVerifier>,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, config: &AppConfig) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let cart_store = Arc::new(CartStorePostgres::new(pool.clone(), config.commerce.enabled));
        let product_catalog = Arc::new(ProductCatalogPostgres::new(pool));

        if !config.commerce.enabled {
            tracing::warn!("Commerce subsystem disabled, cart endpoints will answer 404");
        }

        // Cart use cases
        let add_use_case = Arc::new(AddToCartUseCaseImpl {
            store: cart_store.clone(),
            catalog: product_catalog,
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateCartItemUseCaseImpl {
            store: cart_store.clone(),
            logger: logger.clone(),
        });
        let remove_use_case = Arc::new(RemoveCartItemUseCaseImpl {
            store: cart_store.clone(),
            logger: logger.clone(),
        });
        let contents_use_case = Arc::new(GetCartContentsUseCaseImpl {
            store: cart_store,
            logger,
        });

        let cart_api = CartApi::new(
            add_use_case,
            update_use_case,
            remove_use_case,
            contents_use_case,
        );

        Self {
            health_api: HealthApi,
            cart_api,
            token_verifier: Arc::new(TokenVerifier::new(&config.auth)),
        }
    }
}
