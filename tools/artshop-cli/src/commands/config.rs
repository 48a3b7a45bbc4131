//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use artshop_pricing::prelude::{Currency, TaxRegime};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.info("[store]");
    ctx.output.kv("currency", &ctx.config.store.currency);
    ctx.output.kv("default_regime", &ctx.config.store.default_regime);

    ctx.output.info("[shipping]");
    ctx.output.kv("charge", &format!("{:.2}", ctx.config.shipping.charge));
    ctx.output.kv("slab_size", &ctx.config.shipping.slab_size.to_string());

    ctx.output.info("[output]");
    ctx.output.kv("show_breakdown", &ctx.config.output.show_breakdown.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("artshop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if Currency::from_code(&ctx.config.store.currency).is_none() {
        errors.push(format!("store.currency '{}' is not supported", ctx.config.store.currency));
    }

    if TaxRegime::parse(&ctx.config.store.default_regime) == TaxRegime::Unknown {
        warnings.push(format!(
            "store.default_regime '{}' is not a GST regime; only CESS will apply",
            ctx.config.store.default_regime
        ));
    }

    if !ctx.config.shipping.charge.is_finite() || ctx.config.shipping.charge < 0.0 {
        errors.push("shipping.charge must be a non-negative number".to_string());
    }

    if ctx.config.shipping.slab_size < 1 {
        warnings.push(format!(
            "shipping.slab_size {} is invalid; the default will be used",
            ctx.config.shipping.slab_size
        ));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
