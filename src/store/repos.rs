//! Repository interfaces over the store
//!
//! Handlers talk to these traits instead of the `KvStore` directly, so
//! the storage mechanism is swappable without touching view logic. Each
//! trait exposes load-all/save-all for its collection plus the singleton
//! accessors that belong to it (current chat id, active key/url, selected
//! model, session record).

use crate::error::Result;
use crate::store::types::{ApiKeyRecord, Bot, Chat, ModelEntry, SessionUser, User};
use crate::store::{keys, KvStore};
use std::sync::Arc;

/// Access to the registered user list and the session record
pub trait UserRepository: Send + Sync {
    /// Load the full user list
    fn load_all(&self) -> Result<Vec<User>>;
    /// Replace the full user list
    fn save_all(&self, users: &[User]) -> Result<()>;
    /// Read the current session record, if any
    fn session(&self) -> Result<Option<SessionUser>>;
    /// Write the session record
    fn save_session(&self, user: &SessionUser) -> Result<()>;
    /// Clear the session record
    fn clear_session(&self) -> Result<()>;
}

/// Access to saved chats and the active chat id
pub trait ChatRepository: Send + Sync {
    /// Load the full chat list, most recently created first
    fn load_all(&self) -> Result<Vec<Chat>>;
    /// Replace the full chat list
    fn save_all(&self, chats: &[Chat]) -> Result<()>;
    /// Id of the active chat, if any
    fn current_chat_id(&self) -> Result<Option<String>>;
    /// Set the active chat id
    fn set_current_chat_id(&self, id: &str) -> Result<()>;
}

/// Access to configured bots
pub trait BotRepository: Send + Sync {
    /// Load the full bot list
    fn load_all(&self) -> Result<Vec<Bot>>;
    /// Replace the full bot list
    fn save_all(&self, bots: &[Bot]) -> Result<()>;
}

/// Access to API key records and the active key/url pair
pub trait ApiKeyRepository: Send + Sync {
    /// Load the full record list
    fn load_all(&self) -> Result<Vec<ApiKeyRecord>>;
    /// Replace the full record list
    fn save_all(&self, records: &[ApiKeyRecord]) -> Result<()>;
    /// The active API key, if configured
    fn active_key(&self) -> Result<Option<String>>;
    /// Set the active API key
    fn set_active_key(&self, key: &str) -> Result<()>;
    /// The active API URL, if configured
    fn active_url(&self) -> Result<Option<String>>;
    /// Set the active API URL
    fn set_active_url(&self, url: &str) -> Result<()>;
}

/// Access to custom model descriptors and the model selection
pub trait ModelRepository: Send + Sync {
    /// Load the custom model list
    fn load_custom(&self) -> Result<Vec<ModelEntry>>;
    /// Replace the custom model list
    fn save_custom(&self, models: &[ModelEntry]) -> Result<()>;
    /// Id of the selected model, if any
    fn selected_model(&self) -> Result<Option<String>>;
    /// Set or clear the model selection
    fn set_selected_model(&self, id: Option<&str>) -> Result<()>;
}

/// Store-backed [`UserRepository`]
pub struct KvUserRepository {
    store: Arc<KvStore>,
}

impl KvUserRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }
}

impl UserRepository for KvUserRepository {
    fn load_all(&self) -> Result<Vec<User>> {
        self.store.load_vec(keys::USERS)
    }

    fn save_all(&self, users: &[User]) -> Result<()> {
        self.store.save_vec(keys::USERS, users)
    }

    fn session(&self) -> Result<Option<SessionUser>> {
        self.store.get(keys::SESSION)
    }

    fn save_session(&self, user: &SessionUser) -> Result<()> {
        self.store.put(keys::SESSION, user)
    }

    fn clear_session(&self) -> Result<()> {
        self.store.remove(keys::SESSION)
    }
}

/// Store-backed [`ChatRepository`]
pub struct KvChatRepository {
    store: Arc<KvStore>,
}

impl KvChatRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }
}

impl ChatRepository for KvChatRepository {
    fn load_all(&self) -> Result<Vec<Chat>> {
        self.store.load_vec(keys::SAVED_CHATS)
    }

    fn save_all(&self, chats: &[Chat]) -> Result<()> {
        self.store.save_vec(keys::SAVED_CHATS, chats)
    }

    fn current_chat_id(&self) -> Result<Option<String>> {
        self.store.get(keys::CURRENT_CHAT_ID)
    }

    fn set_current_chat_id(&self, id: &str) -> Result<()> {
        self.store.put(keys::CURRENT_CHAT_ID, &id)
    }
}

/// Store-backed [`BotRepository`]
pub struct KvBotRepository {
    store: Arc<KvStore>,
}

impl KvBotRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }
}

impl BotRepository for KvBotRepository {
    fn load_all(&self) -> Result<Vec<Bot>> {
        self.store.load_vec(keys::BOTS)
    }

    fn save_all(&self, bots: &[Bot]) -> Result<()> {
        self.store.save_vec(keys::BOTS, bots)
    }
}

/// Store-backed [`ApiKeyRepository`]
pub struct KvApiKeyRepository {
    store: Arc<KvStore>,
}

impl KvApiKeyRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }
}

impl ApiKeyRepository for KvApiKeyRepository {
    fn load_all(&self) -> Result<Vec<ApiKeyRecord>> {
        self.store.load_vec(keys::API_KEYS)
    }

    fn save_all(&self, records: &[ApiKeyRecord]) -> Result<()> {
        self.store.save_vec(keys::API_KEYS, records)
    }

    fn active_key(&self) -> Result<Option<String>> {
        self.store.get(keys::API_KEY)
    }

    fn set_active_key(&self, key: &str) -> Result<()> {
        self.store.put(keys::API_KEY, &key)
    }

    fn active_url(&self) -> Result<Option<String>> {
        self.store.get(keys::API_URL)
    }

    fn set_active_url(&self, url: &str) -> Result<()> {
        self.store.put(keys::API_URL, &url)
    }
}

/// Store-backed [`ModelRepository`]
pub struct KvModelRepository {
    store: Arc<KvStore>,
}

impl KvModelRepository {
    /// Create a repository over the given store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }
}

impl ModelRepository for KvModelRepository {
    fn load_custom(&self) -> Result<Vec<ModelEntry>> {
        self.store.load_vec(keys::CUSTOM_MODELS)
    }

    fn save_custom(&self, models: &[ModelEntry]) -> Result<()> {
        self.store.save_vec(keys::CUSTOM_MODELS, models)
    }

    fn selected_model(&self) -> Result<Option<String>> {
        self.store.get(keys::CURRENT_MODEL)
    }

    fn set_selected_model(&self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => self.store.put(keys::CURRENT_MODEL, &id),
            None => self.store.remove(keys::CURRENT_MODEL),
        }
    }
}

/// Bundle of store-backed repositories sharing one database
///
/// This is what the command dispatcher wires up at startup.
pub struct Repositories {
    /// User list + session record
    pub users: Arc<KvUserRepository>,
    /// Saved chats + active chat id
    pub chats: Arc<KvChatRepository>,
    /// Configured bots
    pub bots: Arc<KvBotRepository>,
    /// API key records + active key/url
    pub api_keys: Arc<KvApiKeyRepository>,
    /// Custom models + selection
    pub models: Arc<KvModelRepository>,
}

impl Repositories {
    /// Build all repositories over a shared store
    pub fn new(store: Arc<KvStore>) -> Self {
        Self {
            users: Arc::new(KvUserRepository::new(store.clone())),
            chats: Arc::new(KvChatRepository::new(store.clone())),
            bots: Arc::new(KvBotRepository::new(store.clone())),
            api_keys: Arc::new(KvApiKeyRepository::new(store.clone())),
            models: Arc::new(KvModelRepository::new(store)),
        }
    }
}
