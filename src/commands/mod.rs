/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes one handler module per view:

- `auth`   — register, login, logout, whoami
- `chat`   — the interactive chat REPL
- `apikey` — active API key/url management
- `models` — model registry management
- `admin`  — the admin views (dashboard, users, bots, keys, messages)

Handlers are intentionally small and use the library components: the
repositories, the session manager, the chat manager, the mock responder,
and the model registry.
*/

use crate::config::Config;
use crate::error::Result;
use crate::session::SessionManager;
use crate::store::{KvStore, Repositories};
use rustyline::DefaultEditor;
use std::sync::Arc;

pub mod admin;
pub mod apikey;
pub mod auth;
pub mod chat;
pub mod models;
pub mod special_commands;

/// Application wiring shared by every handler
///
/// Built once at startup: one store, the repositories over it, and the
/// session manager. Handlers receive this explicitly instead of reaching
/// for any ambient state.
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Store-backed repositories
    pub repos: Repositories,
    /// Session manager and command guards
    pub session: SessionManager,
}

impl App {
    /// Wire the application over the default store location
    ///
    /// Seeds the admin account on first use.
    pub fn new(config: Config) -> Result<Self> {
        let store = match &config.store.db_path {
            Some(path) => KvStore::new_with_path(path.as_str())?,
            None => KvStore::new()?,
        };
        let repos = Repositories::new(Arc::new(store));
        let session = SessionManager::new(repos.users.clone());
        session.ensure_admin(&config.admin)?;
        Ok(Self {
            config,
            repos,
            session,
        })
    }
}

/// Read one line of input with a label
pub(crate) fn prompt(label: &str) -> Result<String> {
    let mut rl = DefaultEditor::new()?;
    let line = rl.readline(&format!("{}: ", label))?;
    Ok(line.trim().to_string())
}

/// Ask a yes/no question; only an explicit "y"/"yes" proceeds
pub(crate) fn confirm(question: &str) -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    let answer = rl.readline(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Mask key material for display: first four characters, then ellipsis
pub(crate) fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    if key.chars().count() > 4 {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
