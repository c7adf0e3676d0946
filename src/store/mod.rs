//! Persistence layer
//!
//! The application keeps every collection as one JSON document under a
//! fixed key, read and written wholesale. `KvStore` holds those documents
//! in an embedded SQLite database; the repository traits in
//! [`repos`] sit on top so handlers never touch the storage mechanism
//! directly.

use crate::error::{Result, OpdeckError};
use anyhow::Context;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

pub mod repos;
pub mod types;

pub use repos::{
    ApiKeyRepository, BotRepository, ChatRepository, KvApiKeyRepository, KvBotRepository,
    KvChatRepository, KvModelRepository, KvUserRepository, ModelRepository, Repositories,
    UserRepository,
};

/// Fixed store keys, one JSON document each
pub mod keys {
    /// Registered users
    pub const USERS: &str = "users";
    /// Saved chats, each with its nested messages
    pub const SAVED_CHATS: &str = "saved_chats";
    /// Configured bots
    pub const BOTS: &str = "bots";
    /// Stored API key records
    pub const API_KEYS: &str = "api_keys";
    /// The active API key
    pub const API_KEY: &str = "api_key";
    /// The active API URL
    pub const API_URL: &str = "api_url";
    /// Id of the active chat
    pub const CURRENT_CHAT_ID: &str = "current_chat_id";
    /// User-added model descriptors
    pub const CUSTOM_MODELS: &str = "custom_models";
    /// Id of the selected model
    pub const CURRENT_MODEL: &str = "current_model";
    /// The sanitized session record
    pub const SESSION: &str = "session";
}

/// Embedded key/value store backing every collection
pub struct KvStore {
    db_path: PathBuf,
}

impl KvStore {
    /// Create a store at the default location
    ///
    /// The path resolves from the `OPDECK_STORE_DB` environment variable
    /// when set, otherwise from the platform data directory. The override
    /// makes it easy to point the binary at a test database without
    /// touching the user's application data dir.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("OPDECK_STORE_DB") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "xbcsmith", "opdeck")
            .ok_or_else(|| OpdeckError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| OpdeckError::Storage(e.to_string()))?;

        let db_path = data_dir.join("opdeck.db");
        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Create a store that uses the specified database path
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable (for example, a temporary directory).
    ///
    /// # Examples
    ///
    /// ```
    /// use opdeck::store::KvStore;
    ///
    /// let store = KvStore::new_with_path("/tmp/opdeck_test.db").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| OpdeckError::Storage(e.to_string()))?;
        }

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| OpdeckError::Storage(e.to_string()))?;

        Ok(())
    }

    fn connection(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| OpdeckError::Storage(e.to_string()).into())
    }

    /// Read the raw JSON document under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to query collection")
            .map_err(|e| OpdeckError::Storage(e.to_string()))?;
        Ok(value)
    }

    /// Write the raw JSON document under `key`, replacing any previous value
    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO collections (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .context("Failed to write collection")
        .map_err(|e| OpdeckError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Remove the document under `key`; removing a missing key is a no-op
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM collections WHERE key = ?", params![key])
            .context("Failed to delete collection")
            .map_err(|e| OpdeckError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Read and deserialize the document under `key`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .context("Failed to deserialize collection")
                    .map_err(|e| OpdeckError::Storage(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and write the document under `key`
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .context("Failed to serialize collection")
            .map_err(|e| OpdeckError::Storage(e.to_string()))?;
        self.put_raw(key, &raw)
    }

    /// Read a collection; a missing key yields an empty list
    pub fn load_vec<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.get::<Vec<T>>(key)?.unwrap_or_default())
    }

    /// Write a collection wholesale
    pub fn save_vec<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.put(key, &items)
    }
}
