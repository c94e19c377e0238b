use std::future::Future;

use crate::catalog::{CatalogClient, CatalogResource, Category, FetchResult, Product};

/// Products shown on the landing page (first 12 of the catalog)
pub type ProductFeed = Feed<Product>;

/// Categories shown on the landing page (first 4 of the catalog)
pub type CategoryFeed = Feed<Category>;

/// Snapshot of a feed's records
///
/// Replaced wholesale when a fetch succeeds, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState<R> {
    pub items: Vec<R>,
}

impl<R> Default for FeedState<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R> FeedState<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One catalog resource held as page-local state
#[derive(Debug)]
pub struct Feed<R> {
    state: FeedState<R>,
    started: bool,
}

impl<R> Default for Feed<R> {
    fn default() -> Self {
        Self {
            state: FeedState::default(),
            started: false,
        }
    }
}

impl<R: CatalogResource> Feed<R> {
    /// Create an empty feed that has not fetched anything yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Current records
    pub fn current(&self) -> &FeedState<R> {
        &self.state
    }

    /// Hand out the fetch for this feed's resource
    ///
    /// Returns `Some` only on the first call, so each feed issues exactly
    /// one request per page activation.
    pub fn start(
        &mut self,
        client: &CatalogClient,
    ) -> Option<impl Future<Output = FetchResult> + Send + 'static> {
        if self.started {
            return None;
        }
        self.started = true;

        let client = client.clone();
        Some(async move { client.fetch(R::PATH).await })
    }

    /// Apply a completed fetch
    ///
    /// Success replaces the state with the first `R::LIMIT` records in
    /// service order. Records that fail to decode are skipped with a
    /// warning. A failed fetch is logged and leaves the previous state in
    /// place, the page keeps working with whatever it had (usually
    /// nothing). Returns whether the state was replaced.
    pub fn apply(&mut self, result: FetchResult) -> bool {
        match result {
            Ok(records) => {
                let received = records.len();
                let items: Vec<R> = records
                    .into_iter()
                    .take(R::LIMIT)
                    .enumerate()
                    .filter_map(|(index, record)| match R::decode(record) {
                        Ok(item) => Some(item),
                        Err(e) => {
                            log::warn!("⚠️  Skipping {} record #{}: {}", R::PATH, index, e);
                            None
                        }
                    })
                    .collect();

                log::info!(
                    "📦 Loaded {} {} (service returned {})",
                    items.len(),
                    R::PATH,
                    received
                );
                self.state = FeedState::new(items);
                true
            }
            Err(e) => {
                log::error!("Failed to fetch {}: {}", R::PATH, e);
                false
            }
        }
    }
}
