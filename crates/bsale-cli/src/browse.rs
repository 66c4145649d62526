//! Interactive catalog over stdin, one command per line.

use std::io::Write;

use bsale_client::BsaleClient;
use bsale_core::{CatalogState, ParseFilterError, ProductId, StateFilter, StockControlFilter};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::{load_page, render_catalog};
use crate::detail::show_product;

const HELP: &str = "\
Comandos:
  n, next          pagina siguiente
  p, prev          pagina anterior
  f, first         primera pagina
  l, last          ultima pagina
  s <texto>        buscar por nombre (s sin texto limpia la busqueda)
  state <v>        any | active | inactive
  stock <v>        any | with | without
  clear            limpiar filtros
  open <id>        ver detalle de un producto
  r, reload        recargar la pagina actual
  h, help          esta ayuda
  q, quit          salir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Next,
    Previous,
    First,
    Last,
    Search(String),
    State(StateFilter),
    StockControl(StockControlFilter),
    Clear,
    Open(ProductId),
    Reload,
    Help,
    Quit,
}

/// What the loop must do after a command changed (or did not change) the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    /// The page cursor moved or a retry was requested; fetch again.
    Reload,
    /// Only the local filter changed; render the page already in memory.
    Redraw,
    Open(ProductId),
    /// Navigation at a boundary.
    Unchanged,
    Help,
    Quit,
}

/// Parses one input line. The error is a message for the user.
pub(crate) fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "n" | "next" => BrowseCommand::Next,
        "p" | "prev" | "previous" => BrowseCommand::Previous,
        "f" | "first" => BrowseCommand::First,
        "l" | "last" => BrowseCommand::Last,
        "s" | "search" => BrowseCommand::Search(rest.to_owned()),
        "state" => BrowseCommand::State(rest.parse().map_err(|e: ParseFilterError| e.to_string())?),
        "stock" => {
            BrowseCommand::StockControl(rest.parse().map_err(|e: ParseFilterError| e.to_string())?)
        }
        "clear" => BrowseCommand::Clear,
        "open" | "o" => {
            let id = rest
                .parse::<ProductId>()
                .map_err(|_| format!("id de producto invalido: \"{rest}\""))?;
            BrowseCommand::Open(id)
        }
        "r" | "reload" => BrowseCommand::Reload,
        "h" | "help" | "?" => BrowseCommand::Help,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "" => return Err("escribe un comando (h para ayuda)".to_owned()),
        other => return Err(format!("comando desconocido: \"{other}\" (h para ayuda)")),
    };
    Ok(command)
}

/// Applies a command to the catalog state and reports the follow-up.
pub(crate) fn apply_command(state: &mut CatalogState, command: BrowseCommand) -> Effect {
    let moved = |changed: bool| if changed { Effect::Reload } else { Effect::Unchanged };
    match command {
        BrowseCommand::Next => moved(state.next_page()),
        BrowseCommand::Previous => moved(state.previous_page()),
        BrowseCommand::First => moved(state.first_page()),
        BrowseCommand::Last => moved(state.last_page()),
        BrowseCommand::Search(text) => {
            state.filter.search = text;
            Effect::Redraw
        }
        BrowseCommand::State(value) => {
            state.filter.state = value;
            Effect::Redraw
        }
        BrowseCommand::StockControl(value) => {
            state.filter.stock_control = value;
            Effect::Redraw
        }
        BrowseCommand::Clear => {
            state.filter.clear();
            Effect::Redraw
        }
        BrowseCommand::Open(id) => Effect::Open(id),
        BrowseCommand::Reload => Effect::Reload,
        BrowseCommand::Help => Effect::Help,
        BrowseCommand::Quit => Effect::Quit,
    }
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

/// Runs the interactive loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail. Fetch failures are shown in the
/// view and never end the loop.
pub(crate) async fn run_browse(client: &BsaleClient, concurrency: usize) -> anyhow::Result<()> {
    let mut state = CatalogState::new();
    load_page(client, &mut state).await;
    println!("{}", render_catalog(&state));
    println!("(h para ayuda)");
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Err(message) => println!("{message}"),
            Ok(command) => match apply_command(&mut state, command) {
                Effect::Reload => {
                    load_page(client, &mut state).await;
                    println!("{}", render_catalog(&state));
                }
                Effect::Redraw => println!("{}", render_catalog(&state)),
                Effect::Unchanged => println!("No hay mas paginas en esa direccion"),
                Effect::Open(id) => {
                    show_product(client, id, concurrency, false).await?;
                    println!();
                    println!("Escribe r para volver a la lista o open <id> para otro producto");
                }
                Effect::Help => println!("{HELP}"),
                Effect::Quit => break,
            },
        }
        prompt()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use bsale_core::{CatalogFilter, CatalogPhase, Product};

    use super::*;

    fn loaded(total: u64) -> CatalogState {
        let mut state = CatalogState::new();
        state.finish_load(
            vec![Product {
                id: 1,
                name: "Polera".to_owned(),
                description: None,
                state: 1,
                stock_control: 1,
                ledger_account: None,
                cost_center: None,
            }],
            total,
        );
        state
    }

    #[test]
    fn parses_navigation_aliases() {
        assert_eq!(parse_command("n"), Ok(BrowseCommand::Next));
        assert_eq!(parse_command("  NEXT "), Ok(BrowseCommand::Next));
        assert_eq!(parse_command("prev"), Ok(BrowseCommand::Previous));
        assert_eq!(parse_command("f"), Ok(BrowseCommand::First));
        assert_eq!(parse_command("last"), Ok(BrowseCommand::Last));
        assert_eq!(parse_command("q"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn search_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse_command("s polera azul"),
            Ok(BrowseCommand::Search("polera azul".to_owned()))
        );
        assert_eq!(parse_command("s"), Ok(BrowseCommand::Search(String::new())));
    }

    #[test]
    fn parses_filter_values() {
        assert_eq!(
            parse_command("state inactive"),
            Ok(BrowseCommand::State(StateFilter::Inactive))
        );
        assert_eq!(
            parse_command("stock with"),
            Ok(BrowseCommand::StockControl(StockControlFilter::With))
        );
        assert!(parse_command("state maybe").is_err());
    }

    #[test]
    fn open_requires_numeric_id() {
        assert_eq!(parse_command("open 42"), Ok(BrowseCommand::Open(42)));
        assert!(parse_command("open abc").is_err());
        assert!(parse_command("open").is_err());
    }

    #[test]
    fn unknown_and_empty_input_are_rejected() {
        assert!(parse_command("").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn filter_commands_redraw_without_reload() {
        let mut state = loaded(60);
        assert_eq!(
            apply_command(&mut state, BrowseCommand::Search("gorro".to_owned())),
            Effect::Redraw
        );
        assert_eq!(state.filter.search, "gorro");
        assert_eq!(state.phase(), &CatalogPhase::Ready);

        assert_eq!(apply_command(&mut state, BrowseCommand::Clear), Effect::Redraw);
        assert_eq!(state.filter, CatalogFilter::default());
    }

    #[test]
    fn paging_reloads_and_clears_filters() {
        let mut state = loaded(60);
        apply_command(&mut state, BrowseCommand::State(StateFilter::Active));
        assert_eq!(apply_command(&mut state, BrowseCommand::Next), Effect::Reload);
        assert_eq!(state.paginator().page_index(), 1);
        assert_eq!(state.filter, CatalogFilter::default());
    }

    #[test]
    fn paging_past_a_boundary_is_unchanged() {
        let mut state = loaded(10);
        assert_eq!(apply_command(&mut state, BrowseCommand::Previous), Effect::Unchanged);
        assert_eq!(apply_command(&mut state, BrowseCommand::Next), Effect::Unchanged);
        assert_eq!(state.paginator().page_index(), 0);
    }

    #[test]
    fn reload_and_open_pass_through() {
        let mut state = loaded(10);
        assert_eq!(apply_command(&mut state, BrowseCommand::Reload), Effect::Reload);
        assert_eq!(apply_command(&mut state, BrowseCommand::Open(7)), Effect::Open(7));
    }
}
