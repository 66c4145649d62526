//! Derived stock figure for a product from its variants and stock records.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::products::{StockRecord, Variant, VariantId};

/// Aggregate stock shown for a product. Computed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "units", rename_all = "snake_case")]
pub enum DerivedStockTotal {
    /// At least one variant is sold without stock accounting.
    Unlimited,
    /// The product has no variants; distinct from zero stock.
    NotApplicable,
    Units(u64),
}

impl DerivedStockTotal {
    /// Applies the aggregation rule to a variant list and the per-variant sums.
    ///
    /// Variants missing from `sums` contribute zero. Evaluation order:
    /// empty variant list, then any unlimited variant, then the numeric sum.
    #[must_use]
    pub fn from_variants(variants: &[Variant], sums: &BTreeMap<VariantId, f64>) -> Self {
        if variants.is_empty() {
            return Self::NotApplicable;
        }
        if variants.iter().any(Variant::is_unlimited) {
            return Self::Unlimited;
        }
        let total: f64 = variants
            .iter()
            .map(|v| sums.get(&v.id).copied().unwrap_or(0.0))
            .sum();
        Self::Units(to_units(total))
    }

    #[must_use]
    pub fn tone(&self) -> StockTone {
        match self {
            Self::Unlimited => StockTone::Unlimited,
            Self::NotApplicable => StockTone::NotApplicable,
            Self::Units(0) => StockTone::Empty,
            Self::Units(_) => StockTone::InStock,
        }
    }
}

impl fmt::Display for DerivedStockTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => write!(f, "Ilimitado"),
            Self::NotApplicable => write!(f, "N/A"),
            Self::Units(n) => write!(f, "{n}"),
        }
    }
}

/// Outcome of resolving a product's stock: the variants seen, each variant's
/// summed quantity, and the derived total.
///
/// Variants whose stock lookup failed are listed in `failed_variants` and
/// contribute zero; `variants_failed` is set when the variant list itself
/// could not be loaded, in which case `variants` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReport {
    pub variants: Vec<Variant>,
    pub sums: BTreeMap<VariantId, f64>,
    pub failed_variants: Vec<VariantId>,
    pub variants_failed: bool,
    pub total: DerivedStockTotal,
}

impl StockReport {
    #[must_use]
    pub fn new(
        variants: Vec<Variant>,
        sums: BTreeMap<VariantId, f64>,
        mut failed_variants: Vec<VariantId>,
        variants_failed: bool,
    ) -> Self {
        failed_variants.sort_unstable();
        let total = DerivedStockTotal::from_variants(&variants, &sums);
        Self {
            variants,
            sums,
            failed_variants,
            variants_failed,
            total,
        }
    }

    /// Report for a product whose variant list could not be loaded.
    #[must_use]
    pub fn without_variants() -> Self {
        Self::new(Vec::new(), BTreeMap::new(), Vec::new(), true)
    }

    /// Summed quantity for one variant; zero when unknown.
    #[must_use]
    pub fn quantity(&self, variant_id: VariantId) -> f64 {
        self.sums.get(&variant_id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.variants_failed || !self.failed_variants.is_empty()
    }
}

/// Display classification of a [`DerivedStockTotal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTone {
    Unlimited,
    NotApplicable,
    InStock,
    Empty,
}

/// Per-variant stock bucket shown on each variant card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// More than 10 units.
    Plenty,
    /// Between 1 and 10 units.
    Low,
    Out,
}

impl StockLevel {
    #[must_use]
    pub fn for_quantity(quantity: f64) -> Self {
        if quantity > 10.0 {
            Self::Plenty
        } else if quantity > 0.0 {
            Self::Low
        } else {
            Self::Out
        }
    }
}

/// Sums `quantityAvailable` over one variant's stock records.
#[must_use]
pub fn sum_records(records: &[StockRecord]) -> f64 {
    records.iter().map(StockRecord::quantity).sum()
}

/// Rounds a summed quantity to whole units, clamping negatives to zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn to_units(total: f64) -> u64 {
    if !total.is_finite() || total <= 0.0 {
        return 0;
    }
    total.round().min(u64::MAX as f64) as u64
}
