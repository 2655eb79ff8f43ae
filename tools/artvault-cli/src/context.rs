//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use artvault_observability::{LogFormat, LogLevel, SessionId, StructuredLogger};
use artvault_shop::dispatch::{Storefront, StorefrontBuilder};

use crate::config::CliConfig;
use crate::output::Output;
use crate::terminal::{TerminalDialogs, TerminalPage};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["artvault.toml", ".artvault.toml", "artvault.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Run without a dialog host.
    pub no_dialogs: bool,
    /// Session logger.
    pub logger: StructuredLogger,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output, no_dialogs: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let logger = build_logger(&config, &output);
        logger
            .debug_builder("context loaded")
            .field(
                "config",
                config_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "defaults".to_string()),
            )
            .emit();

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            no_dialogs,
            logger,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// A storefront builder wired to the terminal.
    pub fn storefront_builder(&self) -> Result<StorefrontBuilder> {
        let mut builder = Storefront::builder(self.config.catalog()?)
            .config(self.config.shop.clone())
            .logger(self.logger.clone())
            .page(TerminalPage::new(self.output.clone()));

        if !self.no_dialogs {
            builder = builder.presenter(TerminalDialogs::new(self.output.clone()));
        }
        Ok(builder)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

fn build_logger(config: &CliConfig, output: &Output) -> StructuredLogger {
    let level = if output.is_verbose() {
        LogLevel::Debug
    } else {
        config.log.level
    };
    let format = if output.is_json() {
        LogFormat::Json
    } else {
        config.log.format
    };

    StructuredLogger::new(SessionId::generate())
        .with_min_level(level)
        .with_format(format)
        .for_component("cli")
}
