mod health;
mod products;

use axum::{Router, routing::get};

use crate::AppState;

pub use products::validate_new_product;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/{id}", get(products::get_product))
}
