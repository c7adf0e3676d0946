//! Entity types persisted by the store
//!
//! These mirror the JSON documents the application keeps under its fixed
//! collection keys: users, chats with their nested messages, bots, API key
//! records, and model descriptors. Field names serialize in camelCase so
//! the documents match the original data format of the demo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default title given to a freshly created chat
pub const DEFAULT_CHAT_TITLE: &str = "New chat";

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the admin views
    Admin,
    /// Regular chat access
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// A registered account
///
/// Passwords are stored as salted digests; see `crate::session` for the
/// hash-and-verify path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Login name
    pub username: String,
    /// Login email
    pub email: String,
    /// Salted password digest (hex)
    pub password_hash: String,
    /// Per-user salt (hex)
    pub salt: String,
    /// Account role
    pub role: Role,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Strip password material for session storage
    pub fn sanitized(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: Some(self.email.clone()),
            role: self.role,
        }
    }
}

/// The sanitized, password-free record written on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Id of the underlying user
    pub id: String,
    /// Login name
    pub username: String,
    /// Login email, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account role
    pub role: Role,
}

impl SessionUser {
    /// Whether this session carries the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Sent by the logged-in user
    User,
    /// Produced by the (mock) assistant
    Assistant,
    /// Produced by the application itself (errors, command results)
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Execution status attached to some messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// The simulated operation is still running
    Executing,
    /// The simulated operation finished
    Complete,
    /// The simulated operation was refused
    Denied,
}

/// Illustrative code payload carried by a code reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeBlocks {
    /// HTML source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// CSS source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// JavaScript source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
}

impl CodeBlocks {
    /// True when no block carries any content
    pub fn is_empty(&self) -> bool {
        self.html.is_none() && self.css.is_none() && self.js.is_none()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Message text
    pub content: String,
    /// Sender role
    pub role: MessageRole,
    /// Optional execution status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// Optional code payload (code replies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_blocks: Option<CodeBlocks>,
    /// Render the static browser mockup for this message (preview replies)
    #[serde(default, skip_serializing_if = "is_false")]
    pub show_preview: bool,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            status: None,
            code_blocks: None,
            show_preview: false,
            created_at: Utc::now(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use opdeck::store::types::{Message, MessageRole};
    ///
    /// let msg = Message::user("Hello!");
    /// assert_eq!(msg.role, MessageRole::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Attach a code payload
    pub fn with_code_blocks(mut self, blocks: CodeBlocks) -> Self {
        self.code_blocks = Some(blocks);
        self
    }

    /// Mark the message as a preview reply
    pub fn with_preview(mut self) -> Self {
        self.show_preview = true;
        self
    }

    /// Attach an execution status
    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A chat: an ordered message list plus display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    /// Unique identifier
    pub id: String,
    /// Display title; starts as "New chat" until retitled
    pub title: String,
    /// Creation day (YYYY-MM-DD)
    pub date: String,
    /// Messages in insertion order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Owning user, when created by a logged-in session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Chat {
    /// Create an empty chat owned by `user_id`
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_CHAT_TITLE.to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            messages: Vec::new(),
            user_id,
        }
    }
}

/// A configured bot; pure configuration, independent of chats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Model identifier the bot is pinned to
    pub model: String,
    /// System prompt
    pub system_prompt: String,
    /// Whether the bot is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A stored API key record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Key material (demo records; masked in list views)
    pub key: String,
    /// Provider label
    pub provider: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last use, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

/// A model descriptor, fetched or custom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier (e.g. "yescale/llama-3-8b-instruct")
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelEntry {
    /// Create a new model descriptor
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
        }
    }
}
