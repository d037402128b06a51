//! Read-only catalog lookups: categories, product listings, single products.

use std::time::Duration;

use atelier_core::domain::product::{Category, CategoryId, Dimensions, Product, ProductId};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::http::BoundedClient;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request timed out after {limit_secs}s")]
    Timeout { limit_secs: u64 },
    #[error("transport failure during catalog request: {0}")]
    Transport(String),
    #[error("catalog endpoint rejected the request with HTTP status {status}")]
    RejectedStatus { status: u16 },
    #[error("catalog endpoint answered with envelope status {status}: {message}")]
    EnvelopeStatus { status: u16, message: String },
    #[error("catalog endpoint returned a malformed response: {0}")]
    MalformedResponse(String),
}

impl CatalogError {
    fn from_reqwest(error: reqwest::Error, limit: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout { limit_secs: limit.as_secs() }
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Every catalog response wraps its payload in the same envelope; the inner
/// `status` must be 200 even when the HTTP layer already said so.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: u16,
    #[serde(default)]
    message: String,
    data: T,
}

impl<T> ApiEnvelope<T> {
    fn into_data(self) -> Result<T, CatalogError> {
        if self.status != 200 {
            return Err(CatalogError::EnvelopeStatus {
                status: self.status,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCategory {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    slug: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    product_count: u32,
    #[serde(default)]
    subcategories: Vec<String>,
}

impl From<ApiCategory> for Category {
    fn from(wire: ApiCategory) -> Self {
        Self {
            id: CategoryId(wire.id),
            name: wire.name,
            slug: wire.slug,
            description: wire.description,
            image: wire.image,
            product_count: wire.product_count,
            subcategories: wire.subcategories,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDimensions {
    width: Decimal,
    height: Decimal,
    depth: Decimal,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiProduct {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    slug: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    original_price: Option<Decimal>,
    category: String,
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    dimensions: Option<ApiDimensions>,
    #[serde(default)]
    materials: Vec<String>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    in_stock: bool,
    #[serde(default)]
    is_new: bool,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    review_count: u32,
}

impl From<ApiProduct> for Product {
    fn from(wire: ApiProduct) -> Self {
        Self {
            id: ProductId(wire.id),
            name: wire.name,
            slug: wire.slug,
            description: wire.description,
            price: wire.price,
            original_price: wire.original_price,
            category: wire.category,
            subcategory: wire.subcategory,
            images: wire.images,
            features: wire.features,
            dimensions: wire.dimensions.map(|d| Dimensions {
                width: d.width,
                height: d.height,
                depth: d.depth,
                unit: d.unit,
            }),
            materials: wire.materials,
            colors: wire.colors,
            in_stock: wire.in_stock,
            is_new: wire.is_new,
            is_featured: wire.is_featured,
            rating: wire.rating,
            review_count: wire.review_count,
        }
    }
}

/// Listing payloads nest the products next to pagination metadata the
/// storefront does not consume.
#[derive(Debug, Deserialize)]
struct ProductsPage {
    products: Vec<ApiProduct>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
}

impl ProductSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::RatingDesc => "rating_desc",
        }
    }
}

/// Filters for `GET /products/list`. Unset fields are omitted from the
/// query string entirely.
#[derive(Clone, Debug, Default)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<ProductSort>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        pairs
    }
}

fn page_pairs(limit: Option<u32>, page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(limit) = limit {
        pairs.push(("limit", limit.to_string()));
    }
    if let Some(page) = page {
        pairs.push(("page", page.to_string()));
    }
    pairs
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: BoundedClient,
    fetch_timeout: Duration,
}

impl CatalogClient {
    pub fn new(http: BoundedClient, fetch_timeout: Duration) -> Self {
        Self { http, fetch_timeout }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let envelope: ApiEnvelope<Vec<ApiCategory>> =
            self.get_json("/categories/list", &[]).await?;
        Ok(envelope.into_data()?.into_iter().map(Category::from).collect())
    }

    /// The remote has no per-slug category endpoint; filter the listing.
    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, CatalogError> {
        let categories = self.list_categories().await?;
        Ok(categories.into_iter().find(|category| category.slug == slug))
    }

    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let pairs = query.to_pairs();
        let envelope: ApiEnvelope<ProductsPage> = self.get_json("/products/list", &pairs).await?;
        Ok(envelope.into_data()?.products.into_iter().map(Product::from).collect())
    }

    pub async fn products_by_category(
        &self,
        category_slug: &str,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> Result<Vec<Product>, CatalogError> {
        let path = format!("/products/category/{category_slug}");
        let envelope: ApiEnvelope<ProductsPage> =
            self.get_json(&path, &page_pairs(limit, page)).await?;
        Ok(envelope.into_data()?.products.into_iter().map(Product::from).collect())
    }

    /// Unlike the category listing, this endpoint returns a bare array.
    pub async fn products_by_subcategory(
        &self,
        subcategory: &str,
        limit: Option<u32>,
        page: Option<u32>,
    ) -> Result<Vec<Product>, CatalogError> {
        let path = format!("/products/subcategory/{subcategory}");
        let envelope: ApiEnvelope<Vec<ApiProduct>> =
            self.get_json(&path, &page_pairs(limit, page)).await?;
        Ok(envelope.into_data()?.into_iter().map(Product::from).collect())
    }

    /// `Ok(None)` on HTTP 404: an unknown slug is an expected outcome for
    /// storefront navigation, not an error.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        let path = format!("/products/slug/{slug}");
        let response = self
            .http
            .get(&path, self.fetch_timeout)
            .send()
            .await
            .map_err(|error| CatalogError::from_reqwest(error, self.fetch_timeout))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(slug, "product not found in catalog");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CatalogError::RejectedStatus { status: response.status().as_u16() });
        }

        let envelope: ApiEnvelope<ApiProduct> = response
            .json()
            .await
            .map_err(|error| CatalogError::MalformedResponse(error.to_string()))?;
        envelope.into_data().map(|product| Some(Product::from(product)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(path, self.fetch_timeout)
            .query(query)
            .send()
            .await
            .map_err(|error| CatalogError::from_reqwest(error, self.fetch_timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(path, status, "catalog endpoint rejected request");
            return Err(CatalogError::RejectedStatus { status });
        }

        response.json().await.map_err(|error| CatalogError::MalformedResponse(error.to_string()))
    }
}
