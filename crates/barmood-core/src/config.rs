use crate::app_config::{AppConfig, DEFAULT_SEARCH_URL, DEFAULT_SITE_ORIGIN};
use crate::records::RankingMode;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_http_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default).trim().to_string();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw)
        } else {
            Err(invalid(var, format!("\"{raw}\" is not an http(s) URL")))
        }
    };

    let search_url = parse_http_url("BARMOOD_SEARCH_URL", DEFAULT_SEARCH_URL)?;
    let site_origin = parse_http_url("BARMOOD_SITE_ORIGIN", DEFAULT_SITE_ORIGIN)?
        .trim_end_matches('/')
        .to_string();

    let user_agent = lookup("BARMOOD_USER_AGENT")
        .ok()
        .map(|ua| ua.trim().to_string())
        .filter(|ua| !ua.is_empty());

    let log_level = or_default("BARMOOD_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BARMOOD_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "BARMOOD_REQUEST_TIMEOUT_SECS",
            "timeout must be greater than zero".to_string(),
        ));
    }
    let max_retries = parse_u32("BARMOOD_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("BARMOOD_RETRY_BACKOFF_BASE_SECS", "2")?;
    let inter_request_delay_ms = parse_u64("BARMOOD_INTER_REQUEST_DELAY_MS", "0")?;
    let top_n = parse_usize("BARMOOD_TOP_N", "3")?;
    let ranking = or_default("BARMOOD_RANKING", RankingMode::PerReview.as_str())
        .parse::<RankingMode>()
        .map_err(|reason| invalid("BARMOOD_RANKING", reason))?;

    Ok(AppConfig {
        search_url,
        site_origin,
        user_agent,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        inter_request_delay_ms,
        top_n,
        ranking,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
