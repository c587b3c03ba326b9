//! `storefront`: drives the storefront core from a terminal.
//!
//! Every command boots the same headless app a rendering surface would,
//! navigates to the matching view and prints the resulting state.

mod commands;

use clap::{Parser, Subcommand};

use commands::Session;

/// Storefront CLI.
#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Headless 3D storefront")]
struct Cli {
    /// Path to config file (default: ~/.storefront/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Product API base URL (overrides the config file).
    #[arg(long = "api-base", global = true)]
    api_base: Option<String>,

    /// Directory holding the cart database (overrides the config file).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<String>,

    /// Keep the cart in memory only.
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List products, optionally filtered by category.
    Products {
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the featured product.
    Featured,

    /// Show one product.
    Product { id: u64 },

    /// Landing view: every product with its 3D preview status.
    Showcase {
        /// Deep-link a product, as `/?product={id}` does.
        #[arg(long)]
        product: Option<u64>,
    },

    /// Cart operations.
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Place an order with the current cart.
    Checkout(commands::checkout::FormArgs),

    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum CartAction {
    /// Show cart contents.
    List,
    /// Add one unit of a product.
    Add { id: u64 },
    /// Remove a product's line.
    Remove { id: u64 },
    /// Set a line's quantity (must be at least 1).
    Set { id: u64, quantity: u32 },
    /// Increase a line's quantity by one.
    Inc { id: u64 },
    /// Decrease a line's quantity by one, stopping at 1.
    Dec { id: u64 },
    /// Empty the cart.
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write the effective configuration to the config file.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(storefront::StorefrontConfig::default_path);
    let json_output = cli.output == "json";

    let opts = commands::Options {
        config_path,
        api_base: cli.api_base,
        data_dir: cli.data_dir.map(std::path::PathBuf::from),
        ephemeral: cli.ephemeral,
    };

    match cli.command {
        Commands::Products { category } => {
            let session = Session::open(&opts)?;
            commands::catalog::products(&session, category.as_deref(), json_output).await?;
        }

        Commands::Featured => {
            let session = Session::open(&opts)?;
            commands::catalog::featured(&session, json_output).await?;
        }

        Commands::Product { id } => {
            let session = Session::open(&opts)?;
            commands::catalog::product(&session, id, json_output).await?;
        }

        Commands::Showcase { product } => {
            let session = Session::open(&opts)?;
            commands::catalog::showcase(&session, product, json_output).await?;
        }

        Commands::Cart { action } => {
            let session = Session::open(&opts)?;
            match action {
                CartAction::List => {}
                CartAction::Add { id } => commands::cart::add(&session, id).await?,
                CartAction::Remove { id } => commands::cart::remove(&session, id).await,
                CartAction::Set { id, quantity } => {
                    if quantity < 1 {
                        anyhow::bail!("Quantity must be at least 1.");
                    }
                    commands::cart::set(&session, id, quantity).await;
                }
                CartAction::Inc { id } => commands::cart::increment(&session, id).await,
                CartAction::Dec { id } => commands::cart::decrement(&session, id).await,
                CartAction::Clear => commands::cart::clear(&session).await,
            }
            commands::cart::list(&session, json_output)?;
        }

        Commands::Checkout(args) => {
            let form = args.into_form()?;
            let session = Session::open(&opts)?;
            commands::checkout::place_order(&session, form, json_output).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&opts)?,
            ConfigAction::Init => commands::config::init(&opts)?,
        },

        Commands::Version => {
            println!("storefront cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
