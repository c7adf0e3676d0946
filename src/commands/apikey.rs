//! Active API key/url management
//!
//! The chat view requires an active key before input is accepted; this is
//! the CLI analog of the original's API settings dialog.

use super::{mask_key, prompt, App};
use crate::error::Result;
use crate::store::ApiKeyRepository;
use colored::Colorize;

/// Set the active API key and URL
pub fn run_set(app: &App, key: Option<String>, url: Option<String>) -> Result<()> {
    app.session.require_user()?;

    let key = match key {
        Some(k) => k,
        None => prompt("API key")?,
    };
    if key.trim().is_empty() {
        println!("{}", "API key must not be empty".red());
        return Ok(());
    }

    let url = match url {
        Some(u) => u,
        None => app
            .repos
            .api_keys
            .active_url()?
            .unwrap_or_else(|| app.config.api.default_url.clone()),
    };

    app.repos.api_keys.set_active_key(&key)?;
    app.repos.api_keys.set_active_url(&url)?;

    println!(
        "{}",
        format!("API settings saved ({} @ {})", mask_key(&key), url).green()
    );
    Ok(())
}

/// Show the active API settings with the key masked
pub fn run_show(app: &App) -> Result<()> {
    app.session.require_user()?;

    match app.repos.api_keys.active_key()? {
        Some(key) => {
            let url = app
                .repos
                .api_keys
                .active_url()?
                .unwrap_or_else(|| app.config.api.default_url.clone());
            println!("Key: {}", mask_key(&key).cyan());
            println!("URL: {}", url);
        }
        None => {
            println!("No API key configured.");
            println!("Run {} to set one.", "opdeck apikey set".cyan());
        }
    }
    Ok(())
}
