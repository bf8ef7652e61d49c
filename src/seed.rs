//! Resets the catalog to a fixed set of demo products.

use rust_decimal::Decimal;

use crate::{error::Result, models::NewProduct, store::ProductStore};

fn product(
    name: &str,
    cents: i64,
    image: &str,
    category: &str,
    variants: &[&str],
    stock: i32,
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        image: image.to_string(),
        category: category.to_string(),
        variants: Some(variants.iter().map(|v| v.to_string()).collect()),
        stock,
    }
}

pub fn catalog() -> Vec<NewProduct> {
    vec![
        product(
            "Classic White T-Shirt",
            2999,
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400",
            "Apparel",
            &["S", "M", "L", "XL"],
            50,
        ),
        product(
            "Denim Jeans",
            7999,
            "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400",
            "Apparel",
            &["28", "30", "32", "34", "36"],
            30,
        ),
        product(
            "Running Shoes",
            11999,
            "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
            "Footwear",
            &["7", "8", "9", "10", "11", "12"],
            0,
        ),
        product(
            "Leather Jacket",
            24999,
            "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400",
            "Apparel",
            &["S", "M", "L", "XL"],
            15,
        ),
        product(
            "Casual Sneakers",
            8999,
            "https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77?w=400",
            "Footwear",
            &["7", "8", "9", "10", "11"],
            25,
        ),
        product(
            "Summer Dress",
            5999,
            "https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?w=400",
            "Apparel",
            &["XS", "S", "M", "L"],
            40,
        ),
        product(
            "Wool Sweater",
            6999,
            "https://images.unsplash.com/photo-1576566588028-4147f3842f27?w=400",
            "Apparel",
            &["S", "M", "L", "XL"],
            20,
        ),
        product(
            "Sports Cap",
            2499,
            "https://images.unsplash.com/photo-1588850561407-ed78c282e89b?w=400",
            "Accessories",
            &["One Size"],
            100,
        ),
    ]
}

/// Clears the store, then inserts [`catalog`] one product at a time.
/// Returns how many products were inserted.
pub async fn run(store: &dyn ProductStore) -> Result<usize> {
    let removed = store.clear_all().await?;
    tracing::info!("Removed {} existing products", removed);

    let products = catalog();
    for product in &products {
        store.create(product).await?;
    }

    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::validate_new_product;
    use serde_json::json;

    #[test]
    fn catalog_has_eight_products() {
        assert_eq!(catalog().len(), 8);
    }

    #[test]
    fn every_seed_record_passes_create_validation() {
        for product in catalog() {
            let payload = json!({
                "name": product.name,
                "price": product.price.to_string().parse::<f64>().unwrap(),
                "image": product.image,
                "category": product.category,
                "variants": product.variants,
                "stock": product.stock,
            });

            assert_eq!(validate_new_product(&payload).unwrap(), product);
        }
    }

    #[test]
    fn footwear_includes_an_out_of_stock_item() {
        let footwear: Vec<_> = catalog()
            .into_iter()
            .filter(|p| p.category == "Footwear")
            .collect();

        assert_eq!(footwear.len(), 2);
        assert!(footwear.iter().any(|p| p.stock == 0));
    }
}
