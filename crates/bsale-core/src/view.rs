//! Explicit state for the catalog and detail views.
//!
//! Rendering code receives these objects instead of reading ambient state,
//! so every transition below is testable without a terminal or network.

use crate::filter::CatalogFilter;
use crate::pagination::Paginator;
use crate::products::Product;
use crate::stock::StockReport;

/// Load phase of the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPhase {
    Loading,
    Ready,
    /// Fatal for the current page; carries the user-facing message.
    Error(String),
}

/// Catalog view: one fetched page, the local filter, and the page cursor.
///
/// Any page change clears the filter because the product set it applied to
/// is replaced.
#[derive(Debug, Clone)]
pub struct CatalogState {
    phase: CatalogPhase,
    products: Vec<Product>,
    pub filter: CatalogFilter,
    paginator: Paginator,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    #[must_use]
    pub fn starting_at(page_index: u32) -> Self {
        Self {
            phase: CatalogPhase::Loading,
            products: Vec::new(),
            filter: CatalogFilter::default(),
            paginator: Paginator::at(page_index),
        }
    }

    #[must_use]
    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    #[must_use]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// The canonical page as fetched, ignoring the filter.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products on the current page that pass the filter, in page order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(&self.products)
    }

    /// Enters `Loading` ahead of a fetch for the current page.
    pub fn begin_load(&mut self) {
        self.phase = CatalogPhase::Loading;
    }

    /// Replaces the page wholesale and records the upstream total.
    pub fn finish_load(&mut self, products: Vec<Product>, total_count: u64) {
        self.products = products;
        self.paginator.set_total_count(total_count);
        self.phase = CatalogPhase::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = CatalogPhase::Error(message.into());
    }

    /// Goes to the first page. Returns `true`: a reload is always required.
    pub fn first_page(&mut self) -> bool {
        self.paginator.first();
        self.on_page_change();
        true
    }

    /// Goes to the previous page; `false` means nothing changed.
    pub fn previous_page(&mut self) -> bool {
        if !self.paginator.previous() {
            return false;
        }
        self.on_page_change();
        true
    }

    /// Goes to the next page; `false` means nothing changed.
    pub fn next_page(&mut self) -> bool {
        if !self.paginator.next() {
            return false;
        }
        self.on_page_change();
        true
    }

    /// Goes to the last page. Returns `true`: a reload is always required.
    pub fn last_page(&mut self) -> bool {
        self.paginator.last();
        self.on_page_change();
        true
    }

    fn on_page_change(&mut self) {
        self.filter.clear();
        self.phase = CatalogPhase::Loading;
    }
}

/// Progress of the derived stock figure inside a ready detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum StockStatus {
    Pending,
    Resolved(StockReport),
}

/// Detail view for one product.
///
/// Product load failure is terminal. Variant and stock failures only
/// degrade the [`StockReport`], so they never reach `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready {
        product: Product,
        stock: StockStatus,
    },
    Error(String),
}

impl DetailState {
    /// Stage 1 finished: static fields are renderable, stock is pending.
    #[must_use]
    pub fn product_loaded(product: Product) -> Self {
        Self::Ready {
            product,
            stock: StockStatus::Pending,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// Stages 2 and 3 finished. Ignored unless the product is loaded.
    pub fn stock_resolved(&mut self, report: StockReport) {
        if let Self::Ready { stock, .. } = self {
            *stock = StockStatus::Resolved(report);
        }
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Ready { product, .. } => Some(product),
            Self::Loading | Self::Error(_) => None,
        }
    }

    #[must_use]
    pub fn is_stock_pending(&self) -> bool {
        matches!(
            self,
            Self::Ready {
                stock: StockStatus::Pending,
                ..
            }
        )
    }
}
