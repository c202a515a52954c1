use crate::records::RankingMode;

pub const DEFAULT_SEARCH_URL: &str = "https://www.restoclub.ru/msk/search/bar-moskvy";
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.restoclub.ru";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub search_url: String,
    /// Origin that relative listing links are resolved against.
    pub site_origin: String,
    /// Explicit client identifier. `None` means the caller picks one from
    /// the browser pool once at startup.
    pub user_agent: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub inter_request_delay_ms: u64,
    pub top_n: usize,
    pub ranking: RankingMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            user_agent: None,
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            max_retries: 0,
            retry_backoff_base_secs: 2,
            inter_request_delay_ms: 0,
            top_n: 3,
            ranking: RankingMode::PerReview,
        }
    }
}
