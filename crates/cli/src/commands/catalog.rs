//! Catalog browsing commands: categories, listings, single products.

use atelier_client::{CatalogClient, CatalogError, ProductQuery, ProductSort};
use rust_decimal::Decimal;
use serde_json::json;

use super::CommandResult;

pub struct ProductFilters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn parse_sort(raw: &str) -> Option<ProductSort> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "price_asc" => Some(ProductSort::PriceAsc),
        "price_desc" => Some(ProductSort::PriceDesc),
        "name_asc" => Some(ProductSort::NameAsc),
        "name_desc" => Some(ProductSort::NameDesc),
        "rating_desc" => Some(ProductSort::RatingDesc),
        _ => None,
    }
}

fn catalog_failure(command: &str, error: CatalogError) -> CommandResult {
    let error_class = match error {
        CatalogError::Timeout { .. } => "timeout",
        CatalogError::Transport(_) => "transport",
        CatalogError::RejectedStatus { .. } | CatalogError::EnvelopeStatus { .. } => "remote",
        CatalogError::MalformedResponse(_) => "malformed_response",
    };
    CommandResult::failure(command, error_class, error.to_string(), 4)
}

pub async fn categories(catalog: &CatalogClient) -> CommandResult {
    match catalog.list_categories().await {
        Ok(categories) => {
            let message = format!("{} categories", categories.len());
            CommandResult::success_with_data(
                "categories",
                message,
                serde_json::to_value(&categories).ok(),
            )
        }
        Err(error) => catalog_failure("categories", error),
    }
}

pub async fn products(catalog: &CatalogClient, filters: ProductFilters) -> CommandResult {
    let sort = match filters.sort.as_deref() {
        Some(raw) => match parse_sort(raw) {
            Some(sort) => Some(sort),
            None => {
                return CommandResult::failure(
                    "products",
                    "invalid_argument",
                    format!(
                        "unsupported sort `{raw}` (expected price_asc|price_desc|name_asc|name_desc|rating_desc)"
                    ),
                    2,
                )
            }
        },
        None => None,
    };

    // Subcategory browsing has its own endpoint; everything else goes
    // through the filterable listing.
    let listing = if let Some(subcategory) = &filters.subcategory {
        catalog.products_by_subcategory(subcategory, filters.limit, filters.page).await
    } else {
        let query = ProductQuery {
            page: filters.page,
            limit: filters.limit,
            category: filters.category,
            search: filters.search,
            sort,
            min_price: filters.min_price,
            max_price: filters.max_price,
        };
        catalog.list_products(&query).await
    };

    match listing {
        Ok(products) => {
            let message = format!("{} products", products.len());
            CommandResult::success_with_data(
                "products",
                message,
                serde_json::to_value(&products).ok(),
            )
        }
        Err(error) => catalog_failure("products", error),
    }
}

pub async fn product(catalog: &CatalogClient, slug: &str) -> CommandResult {
    match catalog.product_by_slug(slug).await {
        Ok(Some(product)) => CommandResult::success_with_data(
            "product",
            format!("found `{slug}`"),
            serde_json::to_value(&product).ok(),
        ),
        Ok(None) => CommandResult::failure_with_data(
            "product",
            "not_found",
            format!("no product with slug `{slug}`"),
            1,
            Some(json!({ "slug": slug })),
        ),
        Err(error) => catalog_failure("product", error),
    }
}
