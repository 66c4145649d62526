//! Local search and filter predicate for a loaded catalog page.
//!
//! Filtering never touches the upstream API: it derives a view of the page
//! that is already in memory, leaving the canonical page untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

/// Filter on the product `state` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Any,
    Active,
    Inactive,
}

/// Filter on the product `stockControl` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockControlFilter {
    #[default]
    Any,
    With,
    Without,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} filter \"{value}\" (expected one of: {expected})")]
pub struct ParseFilterError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl StateFilter {
    fn matches(self, product: &Product) -> bool {
        match self {
            StateFilter::Any => true,
            StateFilter::Active => product.state == 1,
            StateFilter::Inactive => product.state == 0,
        }
    }
}

impl StockControlFilter {
    fn matches(self, product: &Product) -> bool {
        match self {
            StockControlFilter::Any => true,
            StockControlFilter::With => product.stock_control == 1,
            StockControlFilter::Without => product.stock_control == 0,
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateFilter::Any => write!(f, "any"),
            StateFilter::Active => write!(f, "active"),
            StateFilter::Inactive => write!(f, "inactive"),
        }
    }
}

impl fmt::Display for StockControlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockControlFilter::Any => write!(f, "any"),
            StockControlFilter::With => write!(f, "with"),
            StockControlFilter::Without => write!(f, "without"),
        }
    }
}

impl FromStr for StateFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "todos" => Ok(StateFilter::Any),
            "active" | "activo" => Ok(StateFilter::Active),
            "inactive" | "inactivo" => Ok(StateFilter::Inactive),
            _ => Err(ParseFilterError {
                kind: "state",
                value: s.to_owned(),
                expected: "any, active, inactive",
            }),
        }
    }
}

impl FromStr for StockControlFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "todos" => Ok(StockControlFilter::Any),
            "with" | "con-control" => Ok(StockControlFilter::With),
            "without" | "sin-control" => Ok(StockControlFilter::Without),
            _ => Err(ParseFilterError {
                kind: "stock control",
                value: s.to_owned(),
                expected: "any, with, without",
            }),
        }
    }
}

/// The three independent criteria applied to a catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the product name. Blank means no search.
    pub search: String,
    pub state: StateFilter,
    pub stock_control: StockControlFilter,
}

impl CatalogFilter {
    /// `true` if any criterion differs from its default.
    ///
    /// Whitespace-only search text still counts here even though it does not
    /// narrow the result, so the "clear filters" control stays visible.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.state != StateFilter::Any
            || self.stock_control != StockControlFilter::Any
    }

    /// Resets every criterion to its "no filter" value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.state.matches(product)
            && self.stock_control.matches(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        product
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    /// Returns the products that satisfy every active criterion, in page order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
