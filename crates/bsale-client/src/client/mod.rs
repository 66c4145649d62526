//! HTTP client for the Bsale API proxy.

use std::time::Duration;

use bsale_core::{AppConfig, Product, ProductId, StockRecord, Variant, VariantId};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Resource};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::types::{Envelope, ItemList, ProductPage};

/// Client for the four read-only proxy endpoints under `/api/bsale/`.
///
/// Every response is decoded as a `{success, data}` envelope regardless of
/// HTTP status. `success = false` becomes [`ClientError::ApiReportedFailure`]
/// (or [`ClientError::NotFound`] for single-product lookups). Transient
/// transport errors are retried with exponential backoff up to `max_retries`
/// additional attempts.
pub struct BsaleClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl BsaleClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured proxy URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.proxy_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends to the base path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            retry: RetryPolicy {
                max_retries,
                backoff_base_ms,
            },
        })
    }

    /// Fetches one page of the product listing.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ApiReportedFailure`] if the envelope reports failure.
    /// - [`ClientError::Http`] on network failure after all retries.
    /// - [`ClientError::UnexpectedStatus`] for non-2xx responses without an envelope.
    /// - [`ClientError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        offset: u64,
    ) -> Result<ProductPage, ClientError> {
        let url = self.endpoint_url(
            "api/bsale/products.json",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )?;
        let list = self
            .get_data::<ItemList<Product>>(&url, Resource::Products)
            .await?
            .unwrap_or_else(|| ItemList {
                items: Vec::new(),
                count: Some(0),
            });
        Ok(ProductPage::from_items(list))
    }

    /// Fetches a single product by id.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the envelope reports failure, carries
    ///   no product, or the proxy answers 404.
    /// - [`ClientError::Http`], [`ClientError::UnexpectedStatus`],
    ///   [`ClientError::Deserialize`] as for [`Self::fetch_products_page`].
    pub async fn fetch_product(&self, product_id: ProductId) -> Result<Product, ClientError> {
        let url = self.endpoint_url(&format!("api/bsale/products/{product_id}.json"), &[])?;
        match self.get_data::<Product>(&url, Resource::Product).await {
            Ok(Some(product)) => Ok(product),
            Ok(None)
            | Err(
                ClientError::ApiReportedFailure { .. }
                | ClientError::UnexpectedStatus { status: 404, .. },
            ) => Err(ClientError::NotFound { product_id }),
            Err(e) => Err(e),
        }
    }

    /// Fetches the ordered variant list of a product.
    ///
    /// A successful envelope without `items` yields an empty list.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products_page`], with [`Resource::Variants`].
    pub async fn fetch_variants(&self, product_id: ProductId) -> Result<Vec<Variant>, ClientError> {
        let url = self.endpoint_url(
            &format!("api/bsale/products/{product_id}/variants.json"),
            &[],
        )?;
        Ok(self
            .get_data::<ItemList<Variant>>(&url, Resource::Variants)
            .await?
            .map(|list| list.items)
            .unwrap_or_default())
    }

    /// Fetches every stock record (one per location) for a variant.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products_page`], with [`Resource::Stock`].
    pub async fn fetch_stock_records(
        &self,
        variant_id: VariantId,
    ) -> Result<Vec<StockRecord>, ClientError> {
        let url = self.endpoint_url(
            "api/bsale/stocks.json",
            &[("variantid", variant_id.to_string())],
        )?;
        Ok(self
            .get_data::<ItemList<StockRecord>>(&url, Resource::Stock)
            .await?
            .map(|list| list.items)
            .unwrap_or_default())
    }

    /// Joins `path` onto the base URL and appends percent-encoded query pairs.
    fn endpoint_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with retries and unwraps the `{success, data}` envelope.
    ///
    /// Returns `Ok(None)` when the envelope succeeded but carried no `data`.
    async fn get_data<T: DeserializeOwned>(
        &self,
        url: &Url,
        resource: Resource,
    ) -> Result<Option<T>, ClientError> {
        let body =
            retry_with_backoff(self.retry, resource, url, || self.request_json(url)).await?;

        if body.get("success").and_then(serde_json::Value::as_bool) != Some(true) {
            tracing::debug!(%url, %resource, "proxy envelope reported failure");
            return Err(ClientError::ApiReportedFailure { resource });
        }

        let envelope: Envelope<T> =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: format!("{resource} from {url}"),
                source: e,
            })?;
        Ok(envelope.data)
    }

    /// Sends one GET and parses the body as JSON.
    ///
    /// The body is read even for non-2xx statuses because the proxy reports
    /// upstream failures inside the envelope. A non-2xx body that is not an
    /// envelope (not JSON, or JSON without a boolean `success`) becomes
    /// [`ClientError::UnexpectedStatus`], so 5xx answers stay retriable.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<serde_json::Value>(&body);
        if !status.is_success() && !parsed.as_ref().is_ok_and(is_envelope) {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        parsed.map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// `true` when `value` carries the proxy's boolean `success` flag.
fn is_envelope(value: &serde_json::Value) -> bool {
    value.get("success").is_some_and(serde_json::Value::is_boolean)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
