//! Model management commands

use super::App;
use crate::error::Result;
use crate::registry::ModelRegistry;
use crate::store::types::ModelEntry;
use colored::Colorize;
use prettytable::{format, Table};
use serde::Serialize;

/// JSON shape of `models list --json`
#[derive(Debug, Serialize)]
struct ModelListOutput {
    fetched: Vec<ModelEntry>,
    custom: Vec<ModelEntry>,
    selected: Option<String>,
}

fn build_registry(app: &App) -> ModelRegistry {
    ModelRegistry::new(
        app.repos.models.clone(),
        app.repos.api_keys.clone(),
        app.config.registry.fetch_delay_ms,
    )
}

/// List models from both pools
///
/// Runs the simulated fetch when an API key is configured; without one
/// the fetched pool stays empty and a hint is printed (`--refresh` turns
/// the missing key into an error instead).
pub async fn run_list(app: &App, refresh: bool, json: bool) -> Result<()> {
    app.session.require_user()?;
    let mut registry = build_registry(app);

    match registry.fetch_models().await {
        Ok(models) => {
            tracing::debug!("Simulated fetch returned {} models", models.len());
        }
        Err(e) if refresh => return Err(e),
        Err(e) => {
            tracing::debug!("Skipping model fetch: {}", e);
            if !json {
                println!("{}", "Fetched models unavailable: no API key configured.".yellow());
            }
        }
    }

    let selected = registry.ensure_selection()?;

    if json {
        let output = ModelListOutput {
            fetched: registry.fetched().to_vec(),
            custom: registry.custom()?,
            selected,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let fetched = registry.fetched().to_vec();
    let custom = registry.custom()?;
    if fetched.is_empty() && custom.is_empty() {
        println!("{}", "No models available.".yellow());
        println!("Add one with {}.", "opdeck models add <id> <name>".cyan());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "".bold(),
        "ID".bold(),
        "Name".bold(),
        "Pool".bold(),
        "Description".bold()
    ]);

    for (pool, model) in fetched
        .iter()
        .map(|m| ("fetched", m))
        .chain(custom.iter().map(|m| ("custom", m)))
    {
        let marker = if selected.as_deref() == Some(model.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(prettytable::row![
            marker,
            model.id.cyan(),
            model.name,
            pool,
            model.description.as_deref().unwrap_or("-")
        ]);
    }
    table.printstd();
    println!();
    if let Some(selected) = selected {
        println!("Selected: {}", selected.cyan());
    }
    Ok(())
}

/// Add a custom model
pub fn run_add(app: &App, id: &str, name: &str, description: Option<&str>) -> Result<()> {
    app.session.require_user()?;
    let registry = build_registry(app);

    match registry.add_custom_model(id, name, description) {
        Ok(entry) => {
            println!("{}", format!("Added custom model {}", entry.id).green());
            Ok(())
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(())
        }
    }
}

/// Remove a custom model
pub fn run_remove(app: &App, id: &str) -> Result<()> {
    app.session.require_user()?;
    let registry = build_registry(app);

    registry.remove_custom_model(id)?;
    println!("{}", format!("Removed custom model {}", id).green());
    if let Some(selected) = registry.selected()? {
        println!("Selected model is now {}", selected.cyan());
    } else {
        println!("{}", "No models remain; selection cleared.".yellow());
    }
    Ok(())
}

/// Select the model to chat with
///
/// The simulated fetch runs first (when a key is configured) so fetched
/// ids are selectable, not only custom ones.
pub async fn run_use(app: &App, id: &str) -> Result<()> {
    app.session.require_user()?;
    let mut registry = build_registry(app);

    if let Err(e) = registry.fetch_models().await {
        tracing::debug!("Skipping model fetch: {}", e);
    }

    match registry.select_model(id) {
        Ok(()) => {
            println!("{}", format!("Selected model {}", id).green());
            Ok(())
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            println!(
                "Custom models are selectable any time; fetched ids need {} first.",
                "opdeck models list --refresh".cyan()
            );
            Ok(())
        }
    }
}
