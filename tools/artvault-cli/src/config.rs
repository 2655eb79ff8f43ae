//! CLI configuration.

use anyhow::{Context, Result};
use artvault_observability::{LogFormat, LogLevel};
use artvault_shop::catalog::{Catalog, CatalogManifest};
use artvault_shop::config::ShopConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront behavior.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,

    /// Product manifest; the sample gallery when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogManifest>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Build the catalog this config describes.
    pub fn catalog(&self) -> Result<Catalog> {
        let sample;
        let manifest = match &self.catalog {
            Some(manifest) => manifest,
            None => {
                sample = CatalogManifest::sample();
                &sample
            }
        };
        Catalog::from_manifest(manifest, self.shop.currency).context("Invalid catalog manifest")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level (trace, debug, info, warn, error).
    #[serde(default)]
    pub level: LogLevel,

    /// Output format (human or json).
    #[serde(default)]
    pub format: LogFormat,
}

/// Generate a default artvault.toml config file.
pub fn generate_default_config() -> String {
    r#"# ArtVault storefront configuration

[shop]
currency = "USD"
# Simulated checkout / contact acknowledgment delay
ack_delay_ms = 1500
# How long the newsletter confirmation stays up
newsletter_notice_ms = 4000
toast_on_add = true
# contact_phone = "+1 555 010 0199"

[log]
level = "warn"
format = "human"

# Omit the catalog section to use the built-in sample gallery.
# Prices are in minor currency units.
#
# [[catalog.products]]
# id = 1
# title = "Swing Lady"
# category = "historical"
# price = 1200
# old_price = 2000
# image = "assets/images/historical.jpg"
"#
    .to_string()
}
