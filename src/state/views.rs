/// Derived landing page views
///
/// Pure functions from feed snapshots to display-ready lists. Nothing here
/// keeps state: every call recomputes from its inputs, so calling twice on
/// the same feeds gives the same output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;

use super::feed::FeedState;
use crate::catalog::{Category, Product};

/// Maximum number of cards in the featured section
pub const FEATURED_COUNT: usize = 4;

/// Maximum number of cards in the latest section
pub const LATEST_COUNT: usize = 4;

/// Image shown for products without one
pub const FALLBACK_PRODUCT_IMAGE: &str = "https://placehold.co/600x400";

/// Image shown for categories without one
pub const FALLBACK_CATEGORY_IMAGE: &str = "https://placehold.co/100";

/// Label shown for products without a category
pub const FALLBACK_CATEGORY_LABEL: &str = "Uncategorized";

/// A product ready to be rendered as a card
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_label: String,
    pub image_url: String,
    pub category_label: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        let image_url = product
            .images
            .first()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .unwrap_or(FALLBACK_PRODUCT_IMAGE)
            .to_string();

        let category_label = product
            .category
            .as_ref()
            .map(|category| category.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_CATEGORY_LABEL)
            .to_string();

        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price_label: price_label(product.price),
            image_url,
            category_label,
        }
    }
}

/// A category ready to be rendered as a tile
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTile {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

impl From<&Category> for CategoryTile {
    fn from(category: &Category) -> Self {
        let image_url = category
            .image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(FALLBACK_CATEGORY_IMAGE)
            .to_string();

        Self {
            id: category.id,
            name: category.name.clone(),
            image_url,
        }
    }
}

/// Everything the landing page renders, derived from both feeds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandingViews {
    /// Size of the product feed the cards were derived from
    pub product_count: usize,
    /// Size of the category feed the tiles were derived from
    pub category_count: usize,
    pub featured: Vec<ProductCard>,
    pub latest: Vec<ProductCard>,
    pub categories: Vec<CategoryTile>,
}

impl LandingViews {
    pub fn derive(products: &FeedState<Product>, categories: &FeedState<Category>) -> Self {
        Self {
            product_count: products.len(),
            category_count: categories.len(),
            featured: featured(products),
            latest: latest(products),
            categories: category_tiles(categories),
        }
    }
}

/// First products in feed order
pub fn featured(state: &FeedState<Product>) -> Vec<ProductCard> {
    state
        .items
        .iter()
        .take(FEATURED_COUNT)
        .map(ProductCard::from)
        .collect()
}

/// Newest products first
///
/// Unparseable timestamps count as the oldest possible value. The sort is
/// stable, so equal timestamps keep their feed order.
pub fn latest(state: &FeedState<Product>) -> Vec<ProductCard> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &Product)> = state
        .items
        .iter()
        .map(|product| (parse_timestamp(&product.creation_at), product))
        .collect();

    // None < Some(_), so reversing puts unparseable entries last
    keyed.sort_by_key(|(created, _)| Reverse(*created));

    keyed
        .into_iter()
        .take(LATEST_COUNT)
        .map(|(_, product)| ProductCard::from(product))
        .collect()
}

/// Every category in the feed (already bounded when it was fetched)
pub fn category_tiles(state: &FeedState<Category>) -> Vec<CategoryTile> {
    state.items.iter().map(CategoryTile::from).collect()
}

/// Parse a catalog timestamp
///
/// Accepts RFC 3339 (`2024-06-14T03:21:58.000Z`), a date-time without
/// offset (taken as UTC) and a bare date (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a price the way the storefront shows it (`$90`, `$12.5`)
///
/// The value is printed as-is, never rounded.
pub fn price_label(price: f64) -> String {
    format!("${}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::data::CategoryRef;

    fn product(id: i64, creation_at: &str) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            price: 10.0,
            images: vec![format!("https://img.test/{}.jpg", id)],
            category: Some(CategoryRef {
                id: 1,
                name: "Clothes".to_string(),
            }),
            creation_at: creation_at.to_string(),
        }
    }

    fn feed_of(products: Vec<Product>) -> FeedState<Product> {
        FeedState::new(products)
    }

    fn ids(cards: &[ProductCard]) -> Vec<i64> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_featured_is_prefix_in_feed_order() {
        for size in 0..8 {
            let state = feed_of((0..size).map(|i| product(i, "2024-01-01")).collect());
            let expected: Vec<i64> = (0..size.min(4)).collect();
            assert_eq!(ids(&featured(&state)), expected, "feed of {}", size);
        }
    }

    #[test]
    fn test_latest_starts_with_newest_regardless_of_position() {
        let dates = [
            "2024-01-01", "2024-03-01", "2024-02-01", "2023-12-01", "2023-11-01", "2023-10-01",
            "2023-09-01", "2023-08-01", "2023-07-01", "2023-06-01", "2023-05-01", "2023-04-01",
        ];
        let state = feed_of(
            dates
                .iter()
                .enumerate()
                .map(|(i, d)| product(i as i64, d))
                .collect(),
        );

        let latest = latest(&state);

        assert_eq!(ids(&latest), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_latest_is_sorted_descending() {
        let state = feed_of(vec![
            product(1, "2024-06-14T03:21:58.000Z"),
            product(2, "2024-06-15T00:00:00Z"),
            product(3, "2024-06-14T03:21:59+00:00"),
            product(4, "2024-06-13"),
        ]);

        assert_eq!(ids(&latest(&state)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_latest_ties_keep_feed_order() {
        let state = feed_of(vec![
            product(7, "2024-02-01T10:00:00.000Z"),
            product(3, "2024-05-01T10:00:00.000Z"),
            product(9, "2024-02-01T10:00:00.000Z"),
            product(1, "2024-02-01T10:00:00.000Z"),
            product(5, "2024-02-01T10:00:00.000Z"),
        ]);

        assert_eq!(ids(&latest(&state)), vec![3, 7, 9, 1]);
    }

    #[test]
    fn test_unparseable_timestamp_sorts_last_but_is_kept() {
        let state = feed_of(vec![
            product(1, "yesterday"),
            product(2, ""),
            product(3, "2020-01-01"),
        ]);

        assert_eq!(ids(&latest(&state)), vec![3, 1, 2]);
    }

    #[test]
    fn test_latest_is_bounded() {
        let state = feed_of((0..12).map(|i| product(i, "2024-01-01")).collect());
        assert_eq!(latest(&state).len(), 4);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let products = feed_of(vec![product(1, "2024-01-02"), product(2, "2024-01-03")]);
        let categories = FeedState::new(vec![Category {
            id: 1,
            name: "Shoes".to_string(),
            image: None,
        }]);

        let first = LandingViews::derive(&products, &categories);
        let second = LandingViews::derive(&products, &categories);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_images_use_fallback() {
        let mut p = product(1, "2024-01-01");
        p.images.clear();
        assert_eq!(ProductCard::from(&p).image_url, FALLBACK_PRODUCT_IMAGE);

        p.images = vec!["  ".to_string(), "https://img.test/second.jpg".to_string()];
        assert_eq!(ProductCard::from(&p).image_url, FALLBACK_PRODUCT_IMAGE);
    }

    #[test]
    fn test_missing_category_uses_fallback_label() {
        let mut p = product(1, "2024-01-01");
        p.category = None;
        assert_eq!(ProductCard::from(&p).category_label, FALLBACK_CATEGORY_LABEL);
    }

    #[test]
    fn test_category_tiles_are_not_truncated_further() {
        let state = FeedState::new(
            (0..6)
                .map(|i| Category {
                    id: i,
                    name: format!("Category {}", i),
                    image: Some(String::new()),
                })
                .collect(),
        );

        let tiles = category_tiles(&state);

        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.image_url == FALLBACK_CATEGORY_IMAGE));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(midnight, parse_timestamp("2024-03-01T00:00:00Z").unwrap());
        assert_eq!(midnight, parse_timestamp("2024-03-01T00:00:00.000").unwrap());
        assert!(parse_timestamp("03/01/2024").is_none());
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(90.0), "$90");
        assert_eq!(price_label(12.5), "$12.5");
        assert_eq!(price_label(12.999), "$12.999");
        assert_eq!(price_label(0.0), "$0");
    }

    #[test]
    fn test_empty_feeds_derive_empty_views() {
        let views = LandingViews::derive(&FeedState::default(), &FeedState::default());
        assert_eq!(views, LandingViews::default());
    }
}
