#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use catalog_back::{
    AppError, AppState, Result, app,
    config::AppConfig,
    models::{NewProduct, Product},
    store::ProductStore,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Keeps products in memory, ordered the same way as the Postgres store.
#[derive(Default)]
pub struct InMemoryStore {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn list_all(&self, category: Option<&str>) -> Result<Vec<Product>> {
        let products = self.products.lock().unwrap();
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(matching)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        // Round-trip through the column encoding like the database does.
        let encoded = product.encoded_variants()?;
        let stored = Product {
            id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            variants: catalog_back::models::decode_variants(encoded.as_deref())?,
            stock: product.stock,
            created_at: Utc::now(),
        };
        products.push(stored.clone());
        Ok(stored)
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut products = self.products.lock().unwrap();
        let removed = products.len() as u64;
        products.clear();
        Ok(removed)
    }
}

/// Fails every call the way a lost database connection would.
pub struct FailingStore;

#[async_trait]
impl ProductStore for FailingStore {
    async fn list_all(&self, _category: Option<&str>) -> Result<Vec<Product>> {
        Err(AppError::DatabaseError(sqlx::Error::PoolClosed))
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<Product>> {
        Err(AppError::DatabaseError(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _product: &NewProduct) -> Result<Product> {
        Err(AppError::DatabaseError(sqlx::Error::PoolClosed))
    }

    async fn clear_all(&self) -> Result<u64> {
        Err(AppError::DatabaseError(sqlx::Error::PoolClosed))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig::from_vars(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/catalog_test".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        let state = AppState::new(store);
        let router = app::build(&test_config(), state.clone()).expect("router");
        Self { router, state }
    }

    pub async fn seed(&self) -> usize {
        catalog_back::seed::run(self.state.store.as_ref())
            .await
            .expect("seed")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }
}
