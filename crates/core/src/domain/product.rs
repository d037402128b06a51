use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// Catalog category as exposed by the read-only product service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub product_count: u32,
    pub subcategories: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Decimal,
    pub height: Decimal,
    pub depth: Decimal,
    pub unit: String,
}

/// Catalog product record. The wizard only reads `id` and `name` when
/// seeding quote items; the rest renders on listing and detail views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category: String,
    pub subcategory: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub dimensions: Option<Dimensions>,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub is_new: bool,
    pub is_featured: bool,
    pub rating: f32,
    pub review_count: u32,
}
