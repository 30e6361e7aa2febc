//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[data]");
    ctx.output.kv("dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("products", &config.data.products);
    ctx.output.kv("filters", &config.data.filters);
    ctx.output.kv("faq", &config.data.faq);
    ctx.output.kv("gallery", &config.data.gallery);
    ctx.output.kv("timeout_ms", &config.data.timeout_ms.to_string());
    ctx.output.kv("retries", &config.data.retries.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv(
        "dir",
        &ctx.resolve_path(&config.storage.dir).display().to_string(),
    );

    ctx.output.info("[catalog]");
    ctx.output.kv("page_size", &config.catalog.page_size.to_string());
    ctx.output.kv(
        "gallery_page_size",
        &config.catalog.gallery_page_size.to_string(),
    );

    ctx.output.info("[gateway]");
    ctx.output.kv("latency_ms", &config.gateway.latency_ms.to_string());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    tokio::fs::write(&config_path, generate_default_config())
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}
