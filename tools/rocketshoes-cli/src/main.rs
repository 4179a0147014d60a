//! RocketShoes CLI - drive the shopping cart from the command line.
//!
//! Commands:
//! - `rocketshoes cart` - Show and change the cart
//! - `rocketshoes config` - Manage configuration

mod commands;
mod config;
mod context;
mod notify;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, ConfigArgs};

/// RocketShoes CLI - Manage the RocketShoes shopping cart
#[derive(Parser)]
#[command(name = "rocketshoes")]
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
    /// Show and change the shopping cart
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for the
/// RocketShoes crates with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,rocketshoes=debug,rocketshoes_cart=debug,rocketshoes_data=debug,rocketshoes_cache=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
