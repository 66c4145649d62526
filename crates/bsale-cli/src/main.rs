mod browse;
mod catalog;
mod detail;

use bsale_client::BsaleClient;
use bsale_core::{CatalogFilter, ProductId, StateFilter, StockControlFilter};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bsale")]
#[command(about = "Browse the Bsale product catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show one page of the catalog, filtered locally
    Products {
        /// 1-based page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Case-insensitive substring of the product name
        #[arg(long, default_value = "")]
        search: String,

        /// any, active or inactive
        #[arg(long, default_value_t = StateFilter::Any)]
        state: StateFilter,

        /// any, with or without
        #[arg(long, default_value_t = StockControlFilter::Any)]
        stock_control: StockControlFilter,

        /// Print the filtered page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one product with its variants and aggregated stock
    Product {
        id: ProductId,

        /// Print the product and stock report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Page through the catalog interactively (default)
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bsale_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");
    let client = BsaleClient::from_config(&config)?;

    match cli.command {
        Some(Commands::Products {
            page,
            search,
            state,
            stock_control,
            json,
        }) => {
            let filter = CatalogFilter {
                search,
                state,
                stock_control,
            };
            catalog::run_products(&client, page - 1, filter, json).await
        }
        Some(Commands::Product { id, json }) => {
            detail::run_product(&client, id, config.stock_concurrency, json).await
        }
        Some(Commands::Browse) | None => browse::run_browse(&client, config.stock_concurrency).await,
    }
}
