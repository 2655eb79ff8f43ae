//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod session;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category to show (all, historical, digital, anime, ...).
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Sort order (default, priceAsc, priceDesc).
    #[arg(short, long, default_value = "default")]
    pub sort: String,

    /// Case-insensitive title search.
    #[arg(long, default_value = "")]
    pub search: String,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    /// Action script; reads stdin when omitted.
    #[arg(short, long)]
    pub script: Option<String>,

    /// Leave pending acknowledgments unfinished at end of input.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Skip the checkout confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write artvault.json with every default spelled out.
        #[arg(long)]
        json: bool,
    },
}
