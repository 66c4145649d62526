/// Runtime settings for talking to the commerce API proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin of the proxy; endpoint paths are appended under `/api/bsale/`.
    pub proxy_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Extra attempts after the first failure for transient transport errors.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Upper bound on concurrent per-variant stock lookups.
    pub stock_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: "https://bsale-proxy.vercel.app".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            user_agent: "bsale-catalog/0.1".to_string(),
            max_retries: 2,
            retry_backoff_base_ms: 250,
            stock_concurrency: 8,
        }
    }
}
