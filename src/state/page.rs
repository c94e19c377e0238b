use iced::task::Handle;
use iced::Task;
use std::sync::atomic::{AtomicU64, Ordering};

use super::feed::{CategoryFeed, FeedState, ProductFeed};
use super::views::LandingViews;
use crate::catalog::{CatalogClient, Category, FetchResult, Product};
use crate::Message;

static NEXT_ACTIVATION: AtomicU64 = AtomicU64::new(1);

/// Identifies one lifetime of the landing page
///
/// Fetch completions carry the id of the page that started them, so a
/// response arriving after a refresh cannot land in the new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivationId(u64);

impl ActivationId {
    fn next() -> Self {
        Self(NEXT_ACTIVATION.fetch_add(1, Ordering::Relaxed))
    }
}

/// The landing page for one activation
///
/// Owns both feeds. Dropping the page aborts whatever fetch is still in
/// flight.
pub struct LandingPage {
    activation: ActivationId,
    products: ProductFeed,
    categories: CategoryFeed,
    /// Abort handles of the fetches started by this page
    fetches: Vec<Handle>,
}

impl LandingPage {
    /// Create a page with empty feeds and a fresh activation id
    pub fn new() -> Self {
        Self {
            activation: ActivationId::next(),
            products: ProductFeed::new(),
            categories: CategoryFeed::new(),
            fetches: Vec::new(),
        }
    }

    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    /// Kick off both catalog fetches
    ///
    /// The two requests run as independent tasks, neither waits for the
    /// other. Calling this again on the same page starts nothing.
    pub fn start(&mut self, client: &CatalogClient) -> Task<Message> {
        let activation = self.activation;
        let mut tasks = Vec::with_capacity(2);

        if let Some(fetch) = self.products.start(client) {
            tasks.push(self.track(Task::perform(fetch, move |result| {
                Message::ProductsFetched(activation, result)
            })));
        }

        if let Some(fetch) = self.categories.start(client) {
            tasks.push(self.track(Task::perform(fetch, move |result| {
                Message::CategoriesFetched(activation, result)
            })));
        }

        if !tasks.is_empty() {
            log::info!("🛒 Activating landing page {:?}", activation);
        }

        Task::batch(tasks)
    }

    fn track(&mut self, task: Task<Message>) -> Task<Message> {
        let (task, handle) = task.abortable();
        self.fetches.push(handle);
        task
    }

    /// Abort every fetch this page started
    ///
    /// Runs when the page is dropped. Completions that already made it into
    /// the message queue are still caught by the activation id check.
    pub fn teardown(&mut self) {
        let in_flight = self.fetches.iter().filter(|h| !h.is_aborted()).count();
        if in_flight > 0 {
            log::debug!("Tearing down {:?}, aborting {} fetches", self.activation, in_flight);
        }
        for handle in &self.fetches {
            handle.abort();
        }
    }

    /// Deliver a products completion. Returns whether the feed changed.
    pub fn receive_products(&mut self, activation: ActivationId, result: FetchResult) -> bool {
        if !self.is_current(activation, "products") {
            return false;
        }
        self.products.apply(result)
    }

    /// Deliver a categories completion. Returns whether the feed changed.
    pub fn receive_categories(&mut self, activation: ActivationId, result: FetchResult) -> bool {
        if !self.is_current(activation, "categories") {
            return false;
        }
        self.categories.apply(result)
    }

    fn is_current(&self, activation: ActivationId, resource: &str) -> bool {
        if activation == self.activation {
            return true;
        }
        log::debug!(
            "Discarding stale {} completion from {:?} (current page is {:?})",
            resource,
            activation,
            self.activation
        );
        false
    }

    pub fn products(&self) -> &FeedState<Product> {
        self.products.current()
    }

    pub fn categories(&self) -> &FeedState<Category> {
        self.categories.current()
    }

    /// Derive what the page renders from the current feeds
    pub fn views(&self) -> LandingViews {
        LandingViews::derive(self.products(), self.categories())
    }
}

// Implement Debug without the task handles
impl std::fmt::Debug for LandingPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPage")
            .field("activation", &self.activation)
            .field("products", &self.products.current().len())
            .field("categories", &self.categories.current().len())
            .field("in_flight", &self.fetches.len())
            .finish()
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Default for LandingPage {
    fn default() -> Self {
        Self::new()
    }
}
