use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, CorsConfig},
    error::{AppError, Result},
    routes,
    store::ProductStore,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn build(config: &AppConfig, state: AppState) -> Result<Router> {
    let cors = cors_layer(&config.cors)?;

    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let allow_origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_origin(allow_origin))
}
