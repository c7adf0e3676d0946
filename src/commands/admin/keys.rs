//! Admin: stored API key records
//!
//! Records are demo data, separate from the single active key/url pair.
//! When the collection is empty and an active key exists, a default
//! record is seeded from it the first time the view loads.

use super::confirm_delete;
use crate::commands::{mask_key, prompt, App};
use crate::error::{Result, OpdeckError};
use crate::store::types::ApiKeyRecord;
use crate::store::ApiKeyRepository;
use chrono::Utc;
use colored::Colorize;
use prettytable::{format, Table};
use uuid::Uuid;

/// Load records, seeding one from the active key when the collection is
/// empty
fn load_seeded(app: &App) -> Result<Vec<ApiKeyRecord>> {
    let records = app.repos.api_keys.load_all()?;
    if !records.is_empty() {
        return Ok(records);
    }

    let Some(active_key) = app.repos.api_keys.active_key()? else {
        return Ok(records);
    };
    let active_url = app.repos.api_keys.active_url()?.unwrap_or_default();
    let provider = if active_url.contains("yescale") {
        "yescale"
    } else {
        "other"
    };

    let mut name_provider = provider.to_string();
    if let Some(first) = name_provider.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    let seeded = vec![ApiKeyRecord {
        id: Uuid::new_v4().to_string(),
        name: format!("Default {} API Key", name_provider),
        key: active_key,
        provider: provider.to_string(),
        created_at: Utc::now(),
        last_used: Some(Utc::now()),
    }];
    app.repos.api_keys.save_all(&seeded)?;
    tracing::debug!("Seeded default API key record");
    Ok(seeded)
}

fn find_record_index(records: &[ApiKeyRecord], id: &str) -> Option<usize> {
    records.iter().position(|r| r.id == id || r.id.starts_with(id))
}

/// List all key records; key material is masked unless `reveal` is set
pub fn run_list(app: &App, reveal: bool) -> Result<()> {
    app.session.require_admin()?;
    let records = load_seeded(app)?;

    if records.is_empty() {
        println!("{}", "No API keys found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Key".bold(),
        "Provider".bold(),
        "Created".bold(),
        "Last Used".bold()
    ]);

    for record in &records {
        let id_short = record.id.chars().take(8).collect::<String>();
        let key = if reveal {
            record.key.clone()
        } else {
            mask_key(&record.key)
        };
        let last_used = record
            .last_used
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(prettytable::row![
            id_short.cyan(),
            record.name,
            key,
            record.provider,
            record.created_at.format("%Y-%m-%d"),
            last_used
        ]);
    }
    table.printstd();
    println!();
    Ok(())
}

/// Add a key record
pub fn run_add(app: &App, name: &str, key: Option<String>, provider: &str) -> Result<()> {
    app.session.require_admin()?;

    let key = match key {
        Some(k) => k,
        None => prompt("Key")?,
    };
    if name.trim().is_empty() || key.is_empty() || provider.trim().is_empty() {
        println!("{}", "Name, key, and provider are required".red());
        return Ok(());
    }

    let mut records = load_seeded(app)?;
    records.push(ApiKeyRecord {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        key,
        provider: provider.to_string(),
        created_at: Utc::now(),
        last_used: None,
    });
    app.repos.api_keys.save_all(&records)?;

    println!("{}", format!("Added API key {}", name).green());
    Ok(())
}

/// Delete a key record
pub fn run_delete(app: &App, id: &str, yes: bool) -> Result<()> {
    app.session.require_admin()?;

    let mut records = load_seeded(app)?;
    let Some(index) = find_record_index(&records, id) else {
        return Err(OpdeckError::NotFound(format!("API key {}", id)).into());
    };

    if !confirm_delete("API key", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = records.remove(index);
    app.repos.api_keys.save_all(&records)?;
    println!("{}", format!("Deleted API key {}", removed.name).green());
    Ok(())
}
