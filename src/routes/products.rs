use std::str::FromStr;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{NewProduct, Product, ProductQuery},
};

const NAME_REQUIRED: &str = "Product name is required and must be a non-empty string";
const PRICE_REQUIRED: &str = "Price is required and must be a positive number";
const PRICE_OUT_OF_RANGE: &str = "Price is out of range";
const IMAGE_REQUIRED: &str = "Valid image URL is required";
const CATEGORY_REQUIRED: &str = "Category is required";
const VARIANTS_NOT_ARRAY: &str = "Variants must be an array";
const VARIANTS_NOT_STRINGS: &str = "Variants must be an array of strings";
const STOCK_NEGATIVE: &str = "Stock must be a non-negative number";
const STOCK_NOT_WHOLE: &str = "Stock must be a whole number";

pub async fn list_products(
    State(state): State<AppState>,
    params: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(params) =
        params.map_err(|_| AppError::BadRequest("Invalid query string".to_string()))?;

    let products = state
        .store
        .list_all(params.category())
        .await
        .map_err(|e| e.or_fail("Failed to fetch products"))?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id: i32 = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid product id".to_string()))?;

    let product = state
        .store
        .get_by_id(id)
        .await
        .map_err(|e| e.or_fail("Failed to fetch product"))?
        .ok_or(AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("Rejected product payload: {}", rejection);
        AppError::BadRequest("Invalid JSON body".to_string())
    })?;

    let new_product = validate_new_product(&payload)?;

    let product = state
        .store
        .create(&new_product)
        .await
        .map_err(|e| e.or_fail("Failed to create product"))?;

    tracing::info!("Created product {} ({})", product.id, product.name);

    Ok((StatusCode::CREATED, Json(product)))
}

/// Checks the fields in a fixed order and reports only the first failure.
pub fn validate_new_product(payload: &Value) -> Result<NewProduct> {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| bad_request(NAME_REQUIRED))?;

    let price = payload
        .get("price")
        .and_then(Value::as_number)
        .filter(|n| n.as_f64().is_some_and(|v| v > 0.0))
        .ok_or_else(|| bad_request(PRICE_REQUIRED))?;
    let price = parse_price(price)
        .filter(|price| *price > Decimal::ZERO)
        .ok_or_else(|| bad_request(PRICE_OUT_OF_RANGE))?;

    let image = payload
        .get("image")
        .and_then(Value::as_str)
        .filter(|image| image.starts_with("http://") || image.starts_with("https://"))
        .ok_or_else(|| bad_request(IMAGE_REQUIRED))?;

    let category = payload
        .get("category")
        .and_then(Value::as_str)
        .filter(|category| !category.is_empty())
        .ok_or_else(|| bad_request(CATEGORY_REQUIRED))?;

    let variants = match payload.get("variants") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| bad_request(VARIANTS_NOT_STRINGS))?,
        ),
        Some(_) => return Err(bad_request(VARIANTS_NOT_ARRAY)),
    };

    let stock = match payload.get("stock") {
        None => 0,
        Some(Value::Number(n)) => parse_stock(n)?,
        Some(_) => return Err(bad_request(STOCK_NEGATIVE)),
    };

    Ok(NewProduct {
        name: name.to_string(),
        price,
        image: image.to_string(),
        category: category.to_string(),
        variants,
        stock,
    })
}

// Goes through the number's shortest text form so 29.99 stays exactly 29.99.
fn parse_price(n: &Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn parse_stock(n: &Number) -> Result<i32> {
    let value = n
        .as_f64()
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| bad_request(STOCK_NEGATIVE))?;

    if value.fract() != 0.0 || value > f64::from(i32::MAX) {
        return Err(bad_request(STOCK_NOT_WHOLE));
    }

    Ok(value as i32)
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
