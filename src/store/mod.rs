use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{NewProduct, Product},
    queries::product_queries,
};

/// Product persistence as seen by the HTTP layer and the seed loader.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, newest first, optionally restricted to one category.
    async fn list_all(&self, category: Option<&str>) -> Result<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Persists `product` and returns it with its generated id and timestamp.
    async fn create(&self, product: &NewProduct) -> Result<Product>;

    async fn clear_all(&self) -> Result<u64>;
}

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self, category: Option<&str>) -> Result<Vec<Product>> {
        product_queries::find_all(&self.pool, category).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, id).await
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        product_queries::create_product(&self.pool, product).await
    }

    async fn clear_all(&self) -> Result<u64> {
        product_queries::delete_all(&self.pool).await
    }
}
