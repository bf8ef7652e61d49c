use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{NewProduct, Product, ProductRow},
};

const PRODUCT_COLUMNS: &str = "id, name, price, image, category, variants, stock, created_at";

pub async fn find_all(pool: &PgPool, category: Option<&str>) -> Result<Vec<Product>> {
    let mut query: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));

    if let Some(category) = category {
        query.push(" WHERE category = ");
        query.push_bind(category);
    }

    query.push(" ORDER BY created_at DESC, id DESC");

    let rows = query.build_query_as::<ProductRow>().fetch_all(pool).await?;

    rows.into_iter().map(Product::try_from).collect()
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {} FROM products WHERE id = $1",
        PRODUCT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Product::try_from).transpose()
}

pub async fn create_product(pool: &PgPool, product: &NewProduct) -> Result<Product> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO products (name, price, image, category, variants, stock)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {}",
        PRODUCT_COLUMNS
    ))
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.image)
    .bind(&product.category)
    .bind(product.encoded_variants()?)
    .bind(product.stock)
    .fetch_one(pool)
    .await?;

    Product::try_from(row)
}

pub async fn delete_all(pool: &PgPool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products").execute(pool).await?;

    Ok(result.rows_affected())
}
