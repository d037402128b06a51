//! HTTP access to the Atelier storefront API.
//!
//! Two surfaces share one bounded transport:
//! - [`catalog::CatalogClient`] for read-only product and category lookups
//! - [`quotes::QuoteGateway`] for quote submission and status checks

pub mod catalog;
pub mod http;
pub mod quotes;

pub use catalog::{CatalogClient, CatalogError, ProductQuery, ProductSort};
pub use http::BoundedClient;
pub use quotes::{QuoteGateway, QuoteStage, QuoteStatusReport};
