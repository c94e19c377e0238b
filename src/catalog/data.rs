/// Catalog records as returned by the remote service
///
/// These structs mirror the JSON shapes of the `products` and
/// `categories` endpoints. Unknown fields are ignored, and most fields
/// fall back to an empty value so that one sloppy record does not take
/// the whole feed down with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Raw, not yet decoded record from a catalog response
pub type RawRecord = serde_json::Value;

/// A catalog record type bound to its endpoint
///
/// `PATH` is appended to the service base URL, `LIMIT` is how many records
/// the landing page keeps from the response (truncation, not pagination).
pub trait CatalogResource: DeserializeOwned + Clone + Send + 'static {
    /// Resource path relative to the base URL
    const PATH: &'static str;
    /// Number of leading records kept from a response
    const LIMIT: usize;

    /// Decode a single raw record
    fn decode(record: RawRecord) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record)
    }
}

/// Decode a field, falling back to its default on `null` or a wrong type
///
/// Used with `#[serde(default)]` so a missing key behaves the same way.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Snapshot of a category embedded in a product
///
/// This is a copy taken when the product was fetched, it is not kept in
/// sync with the category feed.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryRef {
    pub id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
}

/// A single product in the catalog
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique, stable product ID
    pub id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    /// Price in the shop currency (non-negative)
    #[serde(default, deserialize_with = "or_default")]
    pub price: f64,
    /// Image URLs in display order (may be empty)
    #[serde(default, deserialize_with = "or_default")]
    pub images: Vec<String>,
    /// Category snapshot, `None` when absent, null or missing its id
    #[serde(default, deserialize_with = "or_default")]
    pub category: Option<CategoryRef>,
    /// ISO-8601 creation timestamp, kept as text until derivation
    #[serde(default, rename = "creationAt", deserialize_with = "or_default")]
    pub creation_at: String,
}

impl CatalogResource for Product {
    const PATH: &'static str = "products";
    const LIMIT: usize = 12;
}

/// A product category
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    /// Unique category ID
    pub id: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    /// Tile image URL, if the service has one
    #[serde(default, deserialize_with = "or_default")]
    pub image: Option<String>,
}

impl CatalogResource for Category {
    const PATH: &'static str = "categories";
    const LIMIT: usize = 4;
}
