use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`AppConfig::default`]
/// value.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let proxy_base_url = parse_base_url(&or_default(
        "BSALE_PROXY_BASE_URL",
        &defaults.proxy_base_url,
    ))?;
    let log_level = or_default("BSALE_LOG_LEVEL", &defaults.log_level);
    let request_timeout_secs =
        parse_u64("BSALE_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let user_agent = or_default("BSALE_USER_AGENT", &defaults.user_agent);
    let max_retries = parse_u32("BSALE_MAX_RETRIES", defaults.max_retries)?;
    let retry_backoff_base_ms =
        parse_u64("BSALE_RETRY_BACKOFF_BASE_MS", defaults.retry_backoff_base_ms)?;
    let stock_concurrency = parse_usize("BSALE_STOCK_CONCURRENCY", defaults.stock_concurrency)?;
    if stock_concurrency == 0 {
        return Err(invalid(
            "BSALE_STOCK_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        proxy_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        stock_concurrency,
    })
}

/// Validates the proxy origin and strips trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BSALE_PROXY_BASE_URL".to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
