use std::time::Duration;

/// Default base URL of the remote API, overridable via `COURIER_API_URL`.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable consulted by `CoreConfig::from_env`.
pub const API_URL_ENV: &str = "COURIER_API_URL";

/// Fixed poll interval for the unread-count badge query.
pub const UNREAD_COUNT_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

/// Page window requested from the list endpoints.
///
/// The tables load a single window; the service reports the full count
/// alongside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub limit: i64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub api_base_url: String,
    pub page: PageWindow,
}

impl CoreConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            page: PageWindow::default(),
        }
    }

    /// Build a config from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_window() {
        let page = PageWindow::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn default_config_points_at_local_api() {
        let config = CoreConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
