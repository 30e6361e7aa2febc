//! Cooling CLI - the Raheem Cooling storefront from the terminal.
//!
//! Commands:
//! - `cooling products` - Filter, sort and page through a catalog view
//! - `cooling facets` - Show filter options with product counts
//! - `cooling home` - Featured products and picks per AC type
//! - `cooling cart` - Show and change the shopping cart
//! - `cooling rate` - Rate a product
//! - `cooling subscribe` - Join the newsletter
//! - `cooling contact` - Send the contact form
//! - `cooling visit` - Record a visit
//! - `cooling faq` / `cooling gallery` - Browse the content pages
//! - `cooling config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, ConfigArgs, ContactArgs, FacetsArgs, FaqArgs, GalleryArgs, ProductsArgs, RateArgs,
    SubscribeArgs,
};

/// Cooling CLI - Browse and shop the Raheem Cooling catalog
#[derive(Parser)]
#[command(name = "cooling")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in a catalog view
    Products(ProductsArgs),

    /// Show filter options for a catalog view
    Facets(FacetsArgs),

    /// Show featured products and picks per type
    Home,

    /// Show or change the shopping cart
    Cart(CartArgs),

    /// Rate a product from 1 to 5 stars
    Rate(RateArgs),

    /// Subscribe to the newsletter
    Subscribe(SubscribeArgs),

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// Record a visit and show the visitor count
    Visit,

    /// Search the FAQ
    Faq(FaqArgs),

    /// Browse the installation gallery
    Gallery(GalleryArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Log to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    tracing::debug!(config = ?ctx.config_path, "context loaded");

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Facets(args) => commands::catalog::facets(args, &ctx).await,
        Commands::Home => commands::catalog::home(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Rate(args) => commands::engage::rate(args, &ctx).await,
        Commands::Subscribe(args) => commands::engage::subscribe(args, &ctx).await,
        Commands::Contact(args) => commands::engage::contact(args, &ctx).await,
        Commands::Visit => commands::engage::visit(&ctx).await,
        Commands::Faq(args) => commands::content::faq(args, &ctx).await,
        Commands::Gallery(args) => commands::content::gallery(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
