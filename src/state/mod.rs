/// State management module
///
/// This module handles all landing page state, including:
/// - Catalog feeds and their fetch lifecycle (feed.rs)
/// - Page activation, teardown and stale completions (page.rs)
/// - Featured/latest/category views derived from the feeds (views.rs)

pub mod feed;
pub mod page;
pub mod views;
