//! # Storefront CLI
//!
//! The `storefront` binary is the primary interface for the catalog
//! service. It provides commands for database initialization, seeding,
//! serving the JSON API, and driving the two storefront views from the
//! terminal.
//!
//! ## Usage
//!
//! ```bash
//! storefront --config ./config/storefront.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `storefront init` | Create the SQLite database and run schema migrations |
//! | `storefront seed` | Insert the sample categories and products |
//! | `storefront serve` | Start the catalog HTTP server |
//! | `storefront list` | Print the product listing from a running server |
//! | `storefront add` | Create a product through the creation-form flow |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use storefront::{config, form, listing, migrate, seed, server};

/// Storefront — a small product-catalog service with a JSON API and a
/// terminal storefront.
///
/// Server-side commands (`init`, `seed`, `serve`) read the TOML config named
/// by `--config`; client-side commands (`list`, `add`) talk to a running
/// server and take `--base-url` instead.
#[derive(Parser)]
#[command(
    name = "storefront",
    about = "Storefront — a product-catalog JSON API over SQLite with a terminal storefront",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/storefront.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `categories` and `products`
    /// tables. This command is idempotent — running it multiple times is
    /// safe.
    Init,

    /// Insert the sample catalog.
    ///
    /// Seeds a fixed set of categories, then products referencing them by
    /// name. Fails fast if an expected category is missing.
    Seed,

    /// Start the catalog HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves the
    /// categories and products resources.
    Serve,

    /// Print the product listing from a running server.
    ///
    /// Fetches categories and products once, then filters in memory exactly
    /// like the listing page: category selection plus case-insensitive
    /// substring search over name and description.
    List {
        /// Free-text search over product name and description.
        #[arg(long)]
        search: Option<String>,

        /// Only show products in this category id.
        #[arg(long)]
        category: Option<i64>,

        /// Base URL of a running catalog server.
        #[arg(long, default_value = "http://127.0.0.1:7331")]
        base_url: String,
    },

    /// Create a product through the creation-form flow.
    ///
    /// Validates like the form (name >= 3 chars, description >= 10 chars,
    /// price > 0, category required) and resolves the category against the
    /// loaded list — selecting an existing one case-insensitively or
    /// creating it inline.
    Add {
        /// Product name.
        #[arg(long)]
        name: String,

        /// Product description.
        #[arg(long)]
        description: String,

        /// Price (digits with at most one decimal point).
        #[arg(long)]
        price: String,

        /// Category name to select or create.
        #[arg(long)]
        category: String,

        /// Base URL of a running catalog server.
        #[arg(long, default_value = "http://127.0.0.1:7331")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Client commands talk to a running server and don't need the config.
    match &cli.command {
        Commands::List {
            search,
            category,
            base_url,
        } => {
            listing::run_list(base_url, search.clone(), *category).await?;
            return Ok(());
        }
        Commands::Add {
            name,
            description,
            price,
            category,
            base_url,
        } => {
            form::run_add(base_url, name, description, price, category).await?;
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Seed => {
            seed::run_seed(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::List { .. } | Commands::Add { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
