//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, json } => init_config(force, json, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let shop = &ctx.config.shop;
    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("currency", shop.currency.code());
    ctx.output.kv("ack_delay_ms", &shop.ack_delay_ms.to_string());
    ctx.output.kv("newsletter_notice_ms", &shop.newsletter_notice_ms.to_string());
    ctx.output.kv("toast_on_add", &shop.toast_on_add.to_string());
    ctx.output.kv(
        "contact_phone",
        shop.contact_phone.as_deref().unwrap_or("\u{2014}"),
    );

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level.to_string().to_lowercase());
    ctx.output.kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    let catalog = ctx.config.catalog()?;
    let source = if ctx.config.catalog.is_some() {
        "config"
    } else {
        "built-in sample"
    };
    ctx.output.kv("source", source);
    ctx.output.kv("products", &catalog.len().to_string());
    for product in catalog.iter() {
        ctx.output.list_item(&format!(
            "{} {} ({}) {}",
            product.id,
            product.title,
            product.category,
            product.price.display()
        ));
    }

    Ok(())
}

async fn init_config(force: bool, json: bool, ctx: &Context) -> Result<()> {
    let name = if json { "artvault.json" } else { "artvault.toml" };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if json {
        let path = config_path.to_string_lossy().to_string();
        CliConfig::default().save(&path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
