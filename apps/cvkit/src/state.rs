use crate::config::Config;
use crate::layout::PaginationConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page budget and header reservation used by the paginate and preview routes.
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pagination = PaginationConfig::new(config.items_per_page, config.header_reservation);
        AppState { config, pagination }
    }
}
