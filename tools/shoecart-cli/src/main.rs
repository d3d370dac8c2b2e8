//! Shoecart CLI - Command line shopping cart.
//!
//! Commands:
//! - `shoecart products` - List the catalog
//! - `shoecart show` - Show the cart
//! - `shoecart add` - Add one unit of a product
//! - `shoecart remove` - Remove a product
//! - `shoecart update` - Set a product's amount
//! - `shoecart clear` - Empty the cart
//! - `shoecart submit` - Place the order

mod commands;
mod config;
mod context;
mod output;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{AmountArgs, ProductArgs};
use config::LogFormat;

/// Shoecart - Manage a stock-checked shopping cart
#[derive(Parser)]
#[command(name = "shoecart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Serve the catalog from a JSON document instead of the API
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Product API base URL
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in the catalog
    Products,

    /// Show the cart
    Show,

    /// Add one unit of a product to the cart
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the amount of a product in the cart
    Update(AmountArgs),

    /// Empty the cart
    Clear,

    /// Place the order and empty the cart
    Submit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Resolve config first so logging is up before anything else runs
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let loaded = context::LoadedConfig::resolve(cli.config.as_deref(), &cwd)?;
    init_tracing(cli.verbose, loaded.config.log.format);

    // Flags win over the config file
    let mut ctx = context::Context::new(loaded, output, cwd);
    if let Some(api) = cli.api {
        ctx.config.api.base_url = api;
    }
    ctx.catalog_file = cli.catalog;

    let result = match cli.command {
        Commands::Products => commands::products::run(&ctx).await,
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Clear => commands::cart::clear(&ctx).await,
        Commands::Submit => commands::cart::submit(&ctx).await,
    };

    if let Err(e) = result {
        if commands::already_notified(&e) {
            tracing::debug!(error = %format!("{:#}", e), "cart operation failed");
        } else {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Install the log subscriber. Logs go to stderr so stdout stays clean
/// for `--json` output.
fn init_tracing(verbose: bool, format: LogFormat) {
    let default_filter = if verbose { "shoecart=debug" } else { "shoecart=warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
