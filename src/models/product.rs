use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub variants: Vec<String>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// A `products` row as stored, with variants still encoded.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub variants: Option<String>,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self> {
        Ok(Self {
            variants: decode_variants(row.variants.as_deref())?,
            id: row.id,
            name: row.name,
            price: row.price,
            image: row.image,
            category: row.category,
            stock: row.stock,
            created_at: row.created_at,
        })
    }
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    /// `None` is stored as NULL, distinct from an explicit empty list.
    pub variants: Option<Vec<String>>,
    pub stock: i32,
}

impl NewProduct {
    pub fn encoded_variants(&self) -> Result<Option<String>> {
        self.variants.as_deref().map(encode_variants).transpose()
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

impl ProductQuery {
    /// `?category=` with an empty value filters nothing.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Encodes variants as a JSON array of strings, so JSON string escaping
/// covers commas, quotes and any other character inside a label.
pub fn encode_variants(variants: &[String]) -> Result<String> {
    serde_json::to_string(variants)
        .map_err(|e| AppError::InternalError(format!("Failed to encode variants: {}", e)))
}

/// NULL and empty columns decode to no variants.
pub fn decode_variants(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s).map_err(|e| {
            AppError::InternalError(format!("Stored variants are not a string array: {}", e))
        }),
    }
}
