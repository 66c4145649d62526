//! Catalog view: fetch one page, filter it locally, render it as a table.

use bsale_client::BsaleClient;
use bsale_core::{CatalogFilter, CatalogPhase, CatalogState, Product};
use serde::Serialize;

/// Fetches the page the state's paginator points at and records the outcome.
///
/// Failures are logged and stored as the view's error message; they never
/// propagate, so callers decide how a failed view is presented.
pub(crate) async fn load_page(client: &BsaleClient, state: &mut CatalogState) {
    state.begin_load();
    let limit = state.paginator().limit();
    let offset = state.paginator().offset();
    match client.fetch_products_page(limit, offset).await {
        Ok(page) => {
            tracing::debug!(
                offset,
                received = page.products.len(),
                total = page.total_count,
                "catalog page loaded"
            );
            state.finish_load(page.products, page.total_count);
        }
        Err(e) => {
            tracing::error!(offset, error = %e, "failed to load catalog page");
            state.fail(e.user_message());
        }
    }
}

/// Prints one catalog page with the given local filter.
///
/// # Errors
///
/// Returns an error carrying the localized message if the page failed to load.
pub(crate) async fn run_products(
    client: &BsaleClient,
    page_index: u32,
    filter: CatalogFilter,
    json: bool,
) -> anyhow::Result<()> {
    let mut state = CatalogState::starting_at(page_index);
    load_page(client, &mut state).await;

    if let CatalogPhase::Error(message) = state.phase() {
        anyhow::bail!("{message}");
    }

    state.filter = filter;
    if json {
        println!("{}", serde_json::to_string_pretty(&CatalogJson::from_state(&state))?);
    } else {
        println!("{}", render_catalog(&state));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct CatalogJson<'a> {
    page: u32,
    total_pages: u32,
    total_count: u64,
    filter: &'a CatalogFilter,
    products: Vec<&'a Product>,
}

impl<'a> CatalogJson<'a> {
    fn from_state(state: &'a CatalogState) -> Self {
        Self {
            page: state.paginator().page_index() + 1,
            total_pages: state.paginator().total_pages(),
            total_count: state.paginator().total_count(),
            filter: &state.filter,
            products: state.visible_products(),
        }
    }
}

fn state_label(product: &Product) -> &'static str {
    if product.is_active() {
        "Activo"
    } else {
        "Inactivo"
    }
}

fn stock_control_label(product: &Product) -> &'static str {
    if product.has_stock_control() {
        "Con control"
    } else {
        "Sin control"
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_owned()
    }
}

/// Renders the catalog view for its current phase.
pub(crate) fn render_catalog(state: &CatalogState) -> String {
    match state.phase() {
        CatalogPhase::Loading => return "Cargando productos...".to_owned(),
        CatalogPhase::Error(message) => return message.clone(),
        CatalogPhase::Ready => {}
    }

    let paginator = state.paginator();
    let visible = state.visible_products();
    let mut lines = vec!["Catalogo de Productos".to_owned()];

    if state.filter.has_active_filters() {
        lines.push(format!(
            "Filtros: busqueda=\"{}\" estado={} stock={}",
            state.filter.search, state.filter.state, state.filter.stock_control
        ));
    }
    lines.push(String::new());

    if visible.is_empty() {
        lines.push("No se encontraron productos con los filtros aplicados".to_owned());
    } else {
        lines.push(format!("{:<10}{:<52}{:<10}CONTROL STOCK", "ID", "NOMBRE", "ESTADO"));
        for product in &visible {
            lines.push(format!(
                "{:<10}{:<52}{:<10}{}",
                product.id,
                truncate(&product.name, 48),
                state_label(product),
                stock_control_label(product)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Mostrando {} de {} productos en esta pagina",
        visible.len(),
        state.products().len()
    ));
    if paginator.total_pages() > 0 {
        lines.push(format!(
            "Pagina {} de {} ({} productos en total)",
            paginator.page_index() + 1,
            paginator.total_pages(),
            paginator.total_count()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, state: i32, stock_control: i32) -> Product {
        Product {
            id,
            name: name.to_owned(),
            description: None,
            state,
            stock_control,
            ledger_account: None,
            cost_center: None,
        }
    }

    fn ready_state() -> CatalogState {
        let mut state = CatalogState::new();
        state.finish_load(
            vec![product(1, "Polera Azul", 1, 1), product(2, "Gorro", 0, 0)],
            60,
        );
        state
    }

    #[test]
    fn renders_loading_and_error_phases() {
        let mut state = CatalogState::new();
        assert_eq!(render_catalog(&state), "Cargando productos...");
        state.fail("Error de conexion: timeout");
        assert_eq!(render_catalog(&state), "Error de conexion: timeout");
    }

    #[test]
    fn renders_rows_and_pagination_footer() {
        let out = render_catalog(&ready_state());
        let header = out
            .lines()
            .find(|line| line.starts_with("ID"))
            .expect("table header");
        assert!(header.ends_with("CONTROL STOCK"));
        assert!(out.contains("Polera Azul"));
        assert!(out.contains("Inactivo"));
        assert!(out.contains("Sin control"));
        assert!(out.contains("Pagina 1 de 3 (60 productos en total)"));
        assert!(!out.contains("Filtros:"));
    }

    #[test]
    fn empty_filter_result_is_distinct_message() {
        let mut state = ready_state();
        state.filter.search = "zapatilla".to_owned();
        let out = render_catalog(&state);
        assert!(out.contains("No se encontraron productos"));
        assert!(out.contains("Mostrando 0 de 2"));
        assert!(out.contains("Filtros:"));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(60);
        assert_eq!(truncate(&long, 48).chars().count(), 51);
        assert_eq!(truncate("corto", 48), "corto");
    }

    #[test]
    fn json_view_reports_one_based_page_and_visible_products() {
        let mut state = ready_state();
        state.filter.search = "polera".to_owned();
        let view = CatalogJson::from_state(&state);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.products.len(), 1);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["products"][0]["stockControl"], 1);
    }
}
