//! Retry with exponential back-off and jitter for proxy requests.
//!
//! Only transport-level failures are retried. An envelope with
//! `"success": false` is a definitive answer from upstream and is returned
//! immediately, as are decode errors.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;

use crate::error::{ClientError, Resource};

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connect failures, 5xx statuses with no
/// decodable envelope.
///
/// **Not retriable:** API-reported failures, not-found, decode errors,
/// 4xx statuses, configuration errors.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::Deserialize { .. }
        | ClientError::ApiReportedFailure { .. }
        | ClientError::NotFound { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// Back-off settings shared by every proxy request a client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Extra attempts after the first one.
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Un-jittered delay before retry number `retry` (1-based): the base
    /// doubled per retry, capped at [`MAX_DELAY_MS`].
    pub(crate) fn base_delay_ms(self, retry: u32) -> u64 {
        let exponent = retry.saturating_sub(1).min(10);
        self.backoff_base_ms
            .saturating_mul(1u64 << exponent)
            .min(MAX_DELAY_MS)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn jittered_delay(self, retry: u32) -> Duration {
        let factor = rand::random::<f64>() * 0.5 + 0.75;
        Duration::from_millis((self.base_delay_ms(retry) as f64 * factor) as u64)
    }
}

/// Runs one proxy request for `resource` under `policy`.
///
/// Only errors accepted by [`is_retriable`] trigger another attempt; every
/// retry is logged with the resource and URL it was loading.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    resource: Resource,
    url: &Url,
    mut request: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match request().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || retry >= policy.max_retries {
            return Err(err);
        }
        retry += 1;
        let delay = policy.jittered_delay(retry);
        tracing::warn!(
            %resource,
            %url,
            retry,
            max_retries = policy.max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "proxy request failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
