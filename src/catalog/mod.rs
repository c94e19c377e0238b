/// Remote catalog access
///
/// This module handles:
/// - HTTP requests against the catalog service (client.rs)
/// - Product and category record shapes (data.rs)

pub mod client;
pub mod data;

pub use client::{CatalogClient, FetchError, FetchResult};
pub use data::{CatalogResource, Category, Product};
