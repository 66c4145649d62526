use serde::{Deserialize, Serialize};

/// Numeric identifier Bsale assigns to products and variants.
pub type ProductId = i64;
pub type VariantId = i64;

/// A catalog product as returned by the proxy's `products.json` endpoints.
///
/// Bsale encodes its boolean-ish columns as `0`/`1` integers; they are kept
/// as-is and exposed through the predicate helpers below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `1` = active, `0` = inactive.
    #[serde(default)]
    pub state: i32,
    /// `1` when Bsale tracks stock for this product.
    #[serde(default)]
    pub stock_control: i32,
    #[serde(default)]
    pub ledger_account: Option<String>,
    #[serde(default)]
    pub cost_center: Option<String>,
}

impl Product {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == 1
    }

    #[must_use]
    pub fn has_stock_control(&self) -> bool {
        self.stock_control == 1
    }

    /// Description with empty strings treated as absent.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    #[must_use]
    pub fn ledger_account(&self) -> Option<&str> {
        non_empty(self.ledger_account.as_deref())
    }

    #[must_use]
    pub fn cost_center(&self) -> Option<&str> {
        non_empty(self.cost_center.as_deref())
    }
}

/// A stocked configuration of a [`Product`] (size, color, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub bar_code: Option<String>,
    #[serde(default)]
    pub state: i32,
    /// `1` when the variant is sold without stock accounting.
    #[serde(default)]
    pub unlimited_stock: i32,
}

impl Variant {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == 1
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.unlimited_stock == 1
    }

    /// Display title: the description, or `"Variante {id}"` when it is blank.
    #[must_use]
    pub fn title(&self) -> String {
        non_empty(self.description.as_deref())
            .map_or_else(|| format!("Variante {}", self.id), str::to_owned)
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        non_empty(self.code.as_deref())
    }

    #[must_use]
    pub fn bar_code(&self) -> Option<&str> {
        non_empty(self.bar_code.as_deref())
    }
}

/// Available quantity of one variant at one location.
///
/// Records are requested per variant id, so the embedded `variant`
/// reference is not decoded; its shape varies between upstream versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    /// Absent or `null` counts as zero.
    #[serde(default)]
    pub quantity_available: Option<f64>,
}

impl StockRecord {
    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity_available.unwrap_or(0.0)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_camel_case_fields() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Polera Azul",
            "description": "Algodon",
            "state": 1,
            "stockControl": 1,
            "ledgerAccount": "1101",
            "costCenter": null
        }))
        .unwrap();

        assert_eq!(product.id, 42);
        assert!(product.is_active());
        assert!(product.has_stock_control());
        assert_eq!(product.ledger_account(), Some("1101"));
        assert!(product.cost_center().is_none());
    }

    #[test]
    fn product_missing_optional_fields_default() {
        let product: Product =
            serde_json::from_value(serde_json::json!({"id": 1, "name": "x"})).unwrap();
        assert!(product.description().is_none());
        assert!(!product.is_active());
        assert!(!product.has_stock_control());
    }

    #[test]
    fn empty_description_is_treated_as_absent() {
        let product: Product = serde_json::from_value(
            serde_json::json!({"id": 1, "name": "x", "description": "  "}),
        )
        .unwrap();
        assert!(product.description().is_none());
    }

    #[test]
    fn variant_title_falls_back_to_id() {
        let variant: Variant =
            serde_json::from_value(serde_json::json!({"id": 7, "description": ""})).unwrap();
        assert_eq!(variant.title(), "Variante 7");

        let named: Variant =
            serde_json::from_value(serde_json::json!({"id": 7, "description": "Talla M"}))
                .unwrap();
        assert_eq!(named.title(), "Talla M");
    }

    #[test]
    fn variant_reads_bar_code_and_unlimited_flag() {
        let variant: Variant = serde_json::from_value(serde_json::json!({
            "id": 3,
            "code": "SKU-3",
            "barCode": "7801234567890",
            "state": 1,
            "unlimitedStock": 1
        }))
        .unwrap();
        assert_eq!(variant.code(), Some("SKU-3"));
        assert_eq!(variant.bar_code(), Some("7801234567890"));
        assert!(variant.is_unlimited());
        assert!(variant.is_active());
    }

    #[test]
    fn stock_record_missing_quantity_counts_as_zero() {
        let record: StockRecord =
            serde_json::from_value(serde_json::json!({"variant": {"id": 3}})).unwrap();
        assert!(record.quantity().abs() < f64::EPSILON);
    }

    #[test]
    fn stock_record_ignores_variant_reference_shape() {
        let record: StockRecord = serde_json::from_value(serde_json::json!({
            "quantityAvailable": 5.0,
            "variant": {"href": "https://api.bsale.io/v1/variants/2.json", "id": "2"}
        }))
        .unwrap();
        assert!((record.quantity() - 5.0).abs() < f64::EPSILON);
    }
}
