use iced::{Element, Task, Theme};

mod catalog;
mod config;
mod state;
mod ui;

use catalog::{CatalogClient, FetchResult};
use config::CatalogConfig;
use state::page::{ActivationId, LandingPage};

/// Main application state
struct Storefront {
    /// Shared HTTP client for the catalog service
    client: CatalogClient,
    /// The currently active landing page
    page: LandingPage,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Products fetch finished for the given activation
    ProductsFetched(ActivationId, FetchResult),
    /// Categories fetch finished for the given activation
    CategoriesFetched(ActivationId, FetchResult),
    /// User clicked "Refresh": tear the page down and load it again
    Refresh,
}

impl Storefront {
    /// Create a new instance of the application and activate the page
    fn new() -> (Self, Task<Message>) {
        let config = CatalogConfig::load().unwrap_or_else(|e| {
            log::error!("{}, using default configuration", e);
            CatalogConfig::default()
        });

        // If this fails, we panic because the app cannot reach the catalog at all
        let client = CatalogClient::new(&config)
            .expect("Failed to build HTTP client. Check TLS support on this system.");

        log::info!(
            "🛒 Storefront initialized against {} (timeout {}s)",
            config.base_url,
            config.request_timeout_secs
        );

        let mut page = LandingPage::new();
        let task = page.start(&client);

        (Storefront { client, page }, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ProductsFetched(activation, result) => {
                self.page.receive_products(activation, result);
                Task::none()
            }
            Message::CategoriesFetched(activation, result) => {
                self.page.receive_categories(activation, result);
                Task::none()
            }
            Message::Refresh => {
                // Dropping the old page aborts its in-flight fetches
                self.page = LandingPage::new();
                self.page.start(&self.client)
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::landing::view(self.page.views())
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Storefront", Storefront::update, Storefront::view)
        .theme(Storefront::theme)
        .centered()
        .run_with(Storefront::new)
}
