//! # Catalog Commands
//!
//! Product CRUD, search, the fast-product grid, and barcode lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use minipos_core::types::{NewProduct, Product, ProductPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// Category assigned to products registered straight from an unknown
/// barcode, before anyone files them properly.
const SCANNED_PRODUCT_CATEGORY: &str = "Без категории";

/// Input for product registration. `point_id` comes from config, not the
/// frontend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: String,
    pub price: minipos_core::Money,
    pub category: String,
    #[serde(default)]
    pub is_fast_product: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub barcode: Option<String>,
}

/// Lists the whole catalog.
pub async fn list_products(state: &AppState) -> Result<Vec<Product>, ApiError> {
    Ok(state.store.with_store(|s| s.products().to_vec()))
}

/// Case-insensitive substring search over product names.
pub async fn search_products(state: &AppState, query: &str) -> Result<Vec<Product>, ApiError> {
    let needle = query.trim().to_lowercase();
    Ok(state.store.with_store(|s| {
        s.products()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }))
}

/// Products pinned to the quick-access grid.
pub async fn fast_products(state: &AppState) -> Result<Vec<Product>, ApiError> {
    Ok(state.store.with_store(|s| {
        s.products()
            .iter()
            .filter(|p| p.is_fast_product)
            .cloned()
            .collect()
    }))
}

/// Registers a product.
pub async fn add_product(
    state: &AppState,
    request: AddProductRequest,
) -> Result<Product, ApiError> {
    let new = NewProduct {
        point_id: state.config.point_id.clone(),
        name: request.name,
        price: request.price,
        category: request.category,
        is_fast_product: request.is_fast_product,
        image_url: request.image_url,
        barcode: request.barcode,
    };
    Ok(state.store.with_store_mut(|s| s.add_product(new))?)
}

/// Applies a partial update to a product.
pub async fn update_product(
    state: &AppState,
    id: &str,
    patch: ProductPatch,
) -> Result<Product, ApiError> {
    Ok(state.store.with_store_mut(|s| s.update_product(id, patch))?)
}

/// Deletes a product from the catalog. Receipt history is unaffected.
pub async fn delete_product(state: &AppState, id: &str) -> Result<(), ApiError> {
    Ok(state.store.with_store_mut(|s| s.delete_product(id))?)
}

/// Resolves a barcode to a product, if one carries it.
pub async fn lookup_barcode(state: &AppState, code: &str) -> Result<Option<Product>, ApiError> {
    Ok(state
        .store
        .with_store(|s| s.find_by_barcode(code).cloned()))
}

/// Quick registration for a scanned-but-unknown barcode: name and price from
/// the cashier, everything else defaulted.
pub async fn add_scanned_product(
    state: &AppState,
    code: &str,
    name: &str,
    price: minipos_core::Money,
) -> Result<Product, ApiError> {
    debug!(code, "registering scanned product");
    let new = NewProduct {
        point_id: state.config.point_id.clone(),
        name: name.to_string(),
        price,
        category: SCANNED_PRODUCT_CATEGORY.to_string(),
        is_fast_product: false,
        image_url: String::new(),
        barcode: Some(code.to_string()),
    };
    Ok(state.store.with_store_mut(|s| s.add_product(new))?)
}

/// Catalog grouped by category for the browse screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub products: Vec<Product>,
}

/// Groups the catalog by category, preserving first-seen category order.
pub async fn products_by_category(state: &AppState) -> Result<Vec<CategoryGroup>, ApiError> {
    Ok(state.store.with_store(|s| {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for product in s.products() {
            match groups.iter_mut().find(|g| g.category == product.category) {
                Some(group) => group.products.push(product.clone()),
                None => groups.push(CategoryGroup {
                    category: product.category.clone(),
                    products: vec![product.clone()],
                }),
            }
        }
        groups
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
