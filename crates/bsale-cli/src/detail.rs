//! Product detail view: static fields first, aggregated stock once resolved.

use bsale_client::BsaleClient;
use bsale_core::{
    DerivedStockTotal, DetailState, Product, ProductId, StockLevel, StockReport, StockStatus,
    StockTone,
};
use serde::Serialize;

const BACK_LINK: &str = "<- Volver al catalogo (bsale browse)";

/// Loads and prints a product, then its stock.
///
/// The product's fields are printed as soon as they arrive, with stock shown
/// as pending; the stock section follows once every variant lookup settled.
/// In JSON mode a single document is printed at the end, or an error
/// document carrying the product id and the localized message.
pub(crate) async fn show_product(
    client: &BsaleClient,
    product_id: ProductId,
    concurrency: usize,
    json: bool,
) -> anyhow::Result<DetailState> {
    let mut detail = match client.fetch_product(product_id).await {
        Ok(product) => DetailState::product_loaded(product),
        Err(e) => {
            tracing::error!(product_id, error = %e, "failed to load product");
            DetailState::failed(e.user_message())
        }
    };

    if let DetailState::Error(message) = &detail {
        if json {
            let doc = DetailErrorJson {
                product_id,
                error: message,
            };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        } else {
            println!("{}", render_detail(&detail));
        }
        return Ok(detail);
    }
    if !json {
        println!("{}", render_detail(&detail));
    }

    let report = client.resolve_stock(product_id, concurrency).await;
    detail.stock_resolved(report);

    if let DetailState::Ready {
        product,
        stock: StockStatus::Resolved(report),
    } = &detail
    {
        if json {
            let doc = DetailJson { product, stock: report };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        } else {
            println!();
            println!("{}", render_stock(report));
        }
    }
    Ok(detail)
}

/// Entry point for `bsale product <id>`.
///
/// # Errors
///
/// Returns an error if the product could not be loaded; the localized
/// message has already been printed by then.
pub(crate) async fn run_product(
    client: &BsaleClient,
    product_id: ProductId,
    concurrency: usize,
    json: bool,
) -> anyhow::Result<()> {
    let detail = show_product(client, product_id, concurrency, json).await?;
    if let DetailState::Error(_) = detail {
        anyhow::bail!("product {product_id} could not be loaded");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DetailJson<'a> {
    product: &'a Product,
    stock: &'a StockReport,
}

#[derive(Debug, Serialize)]
struct DetailErrorJson<'a> {
    product_id: ProductId,
    error: &'a str,
}

/// Renders the whole detail view for its current state.
pub(crate) fn render_detail(detail: &DetailState) -> String {
    match detail {
        DetailState::Loading => "Cargando producto...".to_owned(),
        DetailState::Error(message) => format!("{message}\n\n{BACK_LINK}"),
        DetailState::Ready { product, stock } => {
            let mut out = render_product(product);
            out.push_str("\n\n");
            match stock {
                StockStatus::Pending => {
                    out.push_str("Stock Total: Cargando...\n\n");
                    out.push_str("Cargando variantes y stock...");
                }
                StockStatus::Resolved(report) => out.push_str(&render_stock(report)),
            }
            out
        }
    }
}

/// Static fields from the product record.
pub(crate) fn render_product(product: &Product) -> String {
    let state = if product.is_active() {
        "Activo"
    } else {
        "Inactivo"
    };
    let stock_control = if product.has_stock_control() {
        "Si"
    } else {
        "No"
    };

    let mut lines = vec![
        BACK_LINK.to_owned(),
        String::new(),
        format!("{} [{state}]", product.name),
    ];
    if let Some(description) = product.description() {
        lines.push(String::new());
        lines.push("Descripcion".to_owned());
        lines.push(format!("  {description}"));
    }
    lines.push(String::new());
    lines.push("Informacion General".to_owned());
    lines.push(format!("  ID:               {}", product.id));
    lines.push(format!("  Control de Stock: {stock_control}"));
    lines.push(String::new());
    lines.push("Informacion Adicional".to_owned());
    lines.push(format!(
        "  Cuenta Contable:  {}",
        product.ledger_account().unwrap_or("No asignada")
    ));
    lines.push(format!(
        "  Centro de Costo:  {}",
        product.cost_center().unwrap_or("No asignado")
    ));
    lines.join("\n")
}

fn total_line(total: DerivedStockTotal) -> String {
    let note = match total.tone() {
        StockTone::Unlimited => " (al menos una variante sin control de stock)",
        StockTone::NotApplicable => " (sin variantes)",
        StockTone::InStock => "",
        StockTone::Empty => " (sin stock)",
    };
    format!("Stock Total: {total}{note}")
}

fn level_label(level: StockLevel) -> &'static str {
    match level {
        StockLevel::Plenty => "alto",
        StockLevel::Low => "bajo",
        StockLevel::Out => "agotado",
    }
}

/// Formats a summed quantity without a trailing `.0` for whole numbers.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract().abs() < f64::EPSILON {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

/// Aggregated total followed by one card per variant.
pub(crate) fn render_stock(report: &StockReport) -> String {
    let mut lines = vec![total_line(report.total), String::new()];
    lines.push("Variantes y Stock Detallado".to_owned());

    if report.variants.is_empty() {
        lines.push("  Este producto no tiene variantes".to_owned());
        return lines.join("\n");
    }

    for variant in &report.variants {
        let badge = if variant.is_unlimited() {
            "Stock Ilimitado".to_owned()
        } else {
            let quantity = report.quantity(variant.id);
            format!(
                "Stock: {} ({})",
                format_quantity(quantity),
                level_label(StockLevel::for_quantity(quantity))
            )
        };
        lines.push(String::new());
        lines.push(format!("  {}  [{badge}]", variant.title()));
        lines.push(format!("    Codigo: {}", variant.code().unwrap_or("N/A")));
        lines.push(format!(
            "    Codigo de barras: {}",
            variant.bar_code().unwrap_or("N/A")
        ));
        lines.push(format!(
            "    Estado: {}",
            if variant.is_active() {
                "Activo"
            } else {
                "Inactivo"
            }
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use bsale_core::Variant;

    use super::*;

    fn product() -> Product {
        Product {
            id: 42,
            name: "Polera Azul".to_owned(),
            description: Some("Algodon organico".to_owned()),
            state: 1,
            stock_control: 1,
            ledger_account: None,
            cost_center: Some("CC-1".to_owned()),
        }
    }

    fn variant(id: i64, description: Option<&str>, unlimited: bool) -> Variant {
        Variant {
            id,
            description: description.map(str::to_owned),
            code: Some(format!("SKU-{id}")),
            bar_code: None,
            state: 1,
            unlimited_stock: i32::from(unlimited),
        }
    }

    #[test]
    fn pending_stock_renders_product_fields_immediately() {
        let out = render_detail(&DetailState::product_loaded(product()));
        assert!(out.contains("Polera Azul [Activo]"));
        assert!(out.contains("Algodon organico"));
        assert!(out.contains("Cuenta Contable:  No asignada"));
        assert!(out.contains("Centro de Costo:  CC-1"));
        assert!(out.contains("Stock Total: Cargando..."));
    }

    #[test]
    fn error_renders_message_with_back_link() {
        let out = render_detail(&DetailState::failed("Error al cargar el producto"));
        assert!(out.starts_with("Error al cargar el producto"));
        assert!(out.contains("Volver al catalogo"));
    }

    #[test]
    fn json_error_document_carries_id_and_message() {
        let doc = DetailErrorJson {
            product_id: 42,
            error: "Error al cargar el producto",
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"product_id": 42, "error": "Error al cargar el producto"})
        );
    }

    #[test]
    fn resolved_stock_renders_total_and_cards() {
        let report = StockReport::new(
            vec![variant(1, Some("Talla S"), false), variant(2, None, false)],
            BTreeMap::from([(1, 12.0), (2, 3.0)]),
            Vec::new(),
            false,
        );
        let out = render_stock(&report);
        assert!(out.contains("Stock Total: 15"));
        assert!(out.contains("Talla S  [Stock: 12 (alto)]"));
        assert!(out.contains("Variante 2  [Stock: 3 (bajo)]"));
        assert!(out.contains("Codigo de barras: N/A"));
    }

    #[test]
    fn unlimited_and_not_applicable_labels() {
        let unlimited = StockReport::new(
            vec![variant(1, None, true)],
            BTreeMap::new(),
            Vec::new(),
            false,
        );
        let out = render_stock(&unlimited);
        assert!(out.contains("Stock Total: Ilimitado"));
        assert!(out.contains("[Stock Ilimitado]"));

        let none = StockReport::new(Vec::new(), BTreeMap::new(), Vec::new(), false);
        let out = render_stock(&none);
        assert!(out.contains("Stock Total: N/A (sin variantes)"));
        assert!(out.contains("no tiene variantes"));
    }

    #[test]
    fn zero_total_is_marked_empty() {
        let report = StockReport::new(
            vec![variant(1, None, false)],
            BTreeMap::from([(1, 0.0)]),
            Vec::new(),
            false,
        );
        let out = render_stock(&report);
        assert!(out.contains("Stock Total: 0 (sin stock)"));
        assert!(out.contains("(agotado)"));
    }

    #[test]
    fn fractional_quantities_keep_decimals() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.5");
    }
}
