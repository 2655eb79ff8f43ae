//! ArtVault CLI - drive the storefront from a terminal.
//!
//! Commands:
//! - `artvault browse` - Print the filtered, sorted catalog
//! - `artvault session` - Run actions line by line from a script or stdin
//! - `artvault shop` - Interactive shopping prompt
//! - `artvault config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, ConfigArgs, SessionArgs, ShopArgs};

/// ArtVault CLI - browse the gallery and run storefront sessions
#[derive(Parser)]
#[command(name = "artvault")]
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

    /// Run without a dialog host to exercise fallbacks
    #[arg(long, global = true)]
    no_dialogs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog through the filter/sort pipeline
    Browse(BrowseArgs),

    /// Run storefront actions from a script or stdin
    Session(SessionArgs),

    /// Interactive shopping prompt
    Shop(ShopArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output, cli.no_dialogs)?;

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
