//! Stock aggregation across a product's variants.
//!
//! Product → variants → per-variant stock lookups. Stock lookups for
//! different variants are independent and run concurrently; a failed lookup
//! contributes zero instead of failing the whole aggregation.

use std::collections::BTreeMap;

use bsale_core::stock::sum_records;
use bsale_core::{Product, ProductId, StockReport, Variant, VariantId};
use futures::stream::{self, StreamExt};

use crate::client::BsaleClient;
use crate::error::ClientError;

impl BsaleClient {
    /// Sums the available quantity of one variant across all its stock records.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`BsaleClient::fetch_stock_records`].
    pub async fn variant_stock(&self, variant_id: VariantId) -> Result<f64, ClientError> {
        let records = self.fetch_stock_records(variant_id).await?;
        Ok(sum_records(&records))
    }

    /// Resolves variants and stock for a product whose record is already loaded.
    ///
    /// Never fails: a variant-list failure yields an empty report (total
    /// `NotApplicable`), and each failed stock lookup is recorded in
    /// [`StockReport::failed_variants`] with a zero contribution. Both are
    /// logged at `warn`.
    pub async fn resolve_stock(&self, product_id: ProductId, concurrency: usize) -> StockReport {
        let variants = match self.fetch_variants(product_id).await {
            Ok(variants) => variants,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "failed to load variants; stock shown as N/A");
                return StockReport::without_variants();
            }
        };
        self.aggregate_variants(variants, concurrency).await
    }

    /// Looks up stock for every variant with at most `concurrency` requests
    /// in flight and merges the results by variant id.
    ///
    /// Unlimited variants are still queried so per-variant figures stay
    /// available for display.
    pub async fn aggregate_variants(&self, variants: Vec<Variant>, concurrency: usize) -> StockReport {
        let ids: Vec<VariantId> = variants.iter().map(|v| v.id).collect();

        let results: Vec<(VariantId, Result<f64, ClientError>)> = stream::iter(ids)
            .map(|variant_id| async move { (variant_id, self.variant_stock(variant_id).await) })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut sums: BTreeMap<VariantId, f64> = BTreeMap::new();
        let mut failed: Vec<VariantId> = Vec::new();
        for (variant_id, result) in results {
            match result {
                Ok(sum) => {
                    sums.insert(variant_id, sum);
                }
                Err(e) => {
                    tracing::warn!(variant_id, error = %e, "failed to load variant stock; counting as zero");
                    sums.insert(variant_id, 0.0);
                    failed.push(variant_id);
                }
            }
        }

        let report = StockReport::new(variants, sums, failed, false);
        tracing::debug!(
            variants = report.variants.len(),
            failed = report.failed_variants.len(),
            total = %report.total,
            "stock aggregation complete"
        );
        report
    }

    /// Runs the full chain for a product id: product, then variants, then stock.
    ///
    /// # Errors
    ///
    /// Only the product lookup can fail the chain; see
    /// [`BsaleClient::fetch_product`].
    pub async fn resolve_product_stock(
        &self,
        product_id: ProductId,
        concurrency: usize,
    ) -> Result<(Product, StockReport), ClientError> {
        let product = self.fetch_product(product_id).await?;
        let report = self.resolve_stock(product_id, concurrency).await;
        Ok((product, report))
    }
}
