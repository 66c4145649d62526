//! Response envelopes returned by the Bsale API proxy.
//!
//! Every endpoint wraps its payload as `{"success": bool, "data": ...}`.
//! Listing endpoints nest the records under `data.items`, and the product
//! listing adds `data.count` with the total across all pages.

use bsale_core::Product;
use serde::{Deserialize, Serialize};

/// Top-level envelope shared by all proxy endpoints.
///
/// `data` is only decoded once `success` has been checked, so failed
/// responses with an arbitrary `data` shape never reach this type.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

/// `data` payload of the listing endpoints.
#[derive(Debug, Deserialize)]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total matching records across all pages. Only the product listing sets it.
    #[serde(default)]
    pub count: Option<u64>,
}

/// One page of the product listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total products upstream, used for page-count math.
    pub total_count: u64,
}

impl ProductPage {
    pub(crate) fn from_items(list: ItemList<Product>) -> Self {
        let total_count = list
            .count
            .unwrap_or_else(|| u64::try_from(list.items.len()).unwrap_or(u64::MAX));
        Self {
            products: list.items,
            total_count,
        }
    }
}
