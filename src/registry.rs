//! Mock model registry
//!
//! Merges a fixed "fetched" model pool with a user-editable custom pool.
//! The fetched pool is produced by a simulated fetch (fixed delay, no
//! network) and lives only for the process; the custom pool and the
//! selection persist through the repositories.

use crate::error::{Result, OpdeckError};
use crate::store::types::ModelEntry;
use crate::store::{ApiKeyRepository, ModelRepository};
use std::sync::Arc;
use std::time::Duration;

/// The constant list the simulated fetch returns
fn fetched_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry::new(
            "yescale/llama-3-8b-instruct",
            "Llama 3 8B Instruct",
            Some("Meta's Llama 3 8B Instruct model".to_string()),
        ),
        ModelEntry::new(
            "yescale/llama-3-70b-instruct",
            "Llama 3 70B Instruct",
            Some("Meta's Llama 3 70B Instruct model".to_string()),
        ),
        ModelEntry::new(
            "yescale/mistral-7b-instruct",
            "Mistral 7B Instruct",
            Some("Mistral AI's 7B Instruct model".to_string()),
        ),
        ModelEntry::new(
            "yescale/mixtral-8x7b-instruct",
            "Mixtral 8x7B Instruct",
            Some("Mistral AI's Mixtral 8x7B Instruct model".to_string()),
        ),
    ]
}

/// Model registry over the model and API key repositories
pub struct ModelRegistry {
    models: Arc<dyn ModelRepository>,
    api_keys: Arc<dyn ApiKeyRepository>,
    fetch_delay: Duration,
    fetched: Vec<ModelEntry>,
}

impl ModelRegistry {
    /// Create a registry with the given simulated fetch delay
    pub fn new(
        models: Arc<dyn ModelRepository>,
        api_keys: Arc<dyn ApiKeyRepository>,
        fetch_delay_ms: u64,
    ) -> Self {
        Self {
            models,
            api_keys,
            fetch_delay: Duration::from_millis(fetch_delay_ms),
            fetched: Vec::new(),
        }
    }

    /// The fetched pool from the last simulated fetch of this process
    pub fn fetched(&self) -> &[ModelEntry] {
        &self.fetched
    }

    /// The persisted custom pool
    pub fn custom(&self) -> Result<Vec<ModelEntry>> {
        self.models.load_custom()
    }

    /// The combined pool: fetched first, then custom
    pub fn all_models(&self) -> Result<Vec<ModelEntry>> {
        let mut all = self.fetched.clone();
        all.extend(self.models.load_custom()?);
        Ok(all)
    }

    /// Simulated model fetch
    ///
    /// Requires an active API key and URL to be configured, waits the
    /// configured delay, then fills the fetched pool with the constant
    /// list. No external endpoint is contacted.
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::ApiKeyMissing` when no key/url is configured
    pub async fn fetch_models(&mut self) -> Result<Vec<ModelEntry>> {
        let key = self.api_keys.active_key()?;
        let url = self.api_keys.active_url()?;
        if key.is_none() || url.is_none() {
            return Err(OpdeckError::ApiKeyMissing.into());
        }

        tokio::time::sleep(self.fetch_delay).await;
        self.fetched = fetched_models();
        tracing::debug!("Fetched {} models", self.fetched.len());

        self.ensure_selection()?;
        Ok(self.fetched.clone())
    }

    /// Add a model to the persisted custom pool
    ///
    /// A missing description defaults to "Custom model".
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::Validation` when id or name is empty
    pub fn add_custom_model(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<ModelEntry> {
        if id.trim().is_empty() || name.trim().is_empty() {
            return Err(
                OpdeckError::Validation("Model id and name are required".to_string()).into(),
            );
        }

        let entry = ModelEntry::new(
            id,
            name,
            Some(
                description
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or("Custom model")
                    .to_string(),
            ),
        );

        let mut custom = self.models.load_custom()?;
        custom.push(entry.clone());
        self.models.save_custom(&custom)?;

        self.ensure_selection()?;
        Ok(entry)
    }

    /// Remove a model from the persisted custom pool
    ///
    /// When the removed model was selected, the selection falls back to
    /// the first remaining model across both pools, or is cleared when
    /// none remain.
    pub fn remove_custom_model(&self, id: &str) -> Result<()> {
        let mut custom = self.models.load_custom()?;
        custom.retain(|m| m.id != id);
        self.models.save_custom(&custom)?;

        if self.models.selected_model()?.as_deref() == Some(id) {
            let remaining = self.all_models()?;
            match remaining.first() {
                Some(first) => self.models.set_selected_model(Some(&first.id))?,
                None => self.models.set_selected_model(None)?,
            }
        }
        Ok(())
    }

    /// Select a model by id from the combined pool
    ///
    /// # Errors
    ///
    /// Returns `OpdeckError::NotFound` for an id in neither pool
    pub fn select_model(&self, id: &str) -> Result<()> {
        if !self.all_models()?.iter().any(|m| m.id == id) {
            return Err(OpdeckError::NotFound(format!("model {}", id)).into());
        }
        self.models.set_selected_model(Some(id))
    }

    /// The selected model id, if any
    pub fn selected(&self) -> Result<Option<String>> {
        self.models.selected_model()
    }

    /// Auto-select the first model whenever the combined pool is
    /// non-empty and nothing is selected
    pub fn ensure_selection(&self) -> Result<Option<String>> {
        if let Some(current) = self.models.selected_model()? {
            return Ok(Some(current));
        }
        match self.all_models()?.first() {
            Some(first) => {
                self.models.set_selected_model(Some(&first.id))?;
                Ok(Some(first.id.clone()))
            }
            None => Ok(None),
        }
    }
}
