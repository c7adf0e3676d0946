//! Chat session management
//!
//! Maintains the ordered chat list (most recently created first) and the
//! active chat id. Each mutation rewrites the persisted chat list
//! wholesale through the repository.

use crate::error::Result;
use crate::store::types::{Chat, Message, MessageRole, DEFAULT_CHAT_TITLE};
use crate::store::ChatRepository;
use std::sync::Arc;

/// Maximum title length taken from the first user message
const TITLE_PREFIX_LEN: usize = 30;

/// Chat list manager over the chat repository
pub struct ChatManager {
    chats: Arc<dyn ChatRepository>,
}

impl ChatManager {
    /// Create a manager over the given repository
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    /// Create a new empty chat and make it the active chat
    ///
    /// The chat is prepended to the persisted list so the list stays
    /// ordered most-recently-created first.
    pub fn create_chat(&self, user_id: Option<&str>) -> Result<Chat> {
        let chat = Chat::new(user_id.map(|id| id.to_string()));

        let mut chats = self.chats.load_all()?;
        chats.insert(0, chat.clone());
        self.chats.save_all(&chats)?;
        self.chats.set_current_chat_id(&chat.id)?;

        tracing::debug!("Created chat {}", chat.id);
        Ok(chat)
    }

    /// Load the full chat list
    pub fn list_chats(&self) -> Result<Vec<Chat>> {
        self.chats.load_all()
    }

    /// Find a chat by id
    pub fn find_chat(&self, chat_id: &str) -> Result<Option<Chat>> {
        Ok(self.chats.load_all()?.into_iter().find(|c| c.id == chat_id))
    }

    /// Make `chat_id` the active chat and return its messages
    ///
    /// An unknown id is not an error: the id still becomes active and an
    /// empty message list is returned.
    pub fn select_chat(&self, chat_id: &str) -> Result<Vec<Message>> {
        self.chats.set_current_chat_id(chat_id)?;
        let messages = self
            .find_chat(chat_id)?
            .map(|c| c.messages)
            .unwrap_or_default();
        Ok(messages)
    }

    /// The active chat, creating one if none exists
    ///
    /// Resolves the persisted current chat id; when it is missing or
    /// points at a deleted chat, a fresh chat is created and activated so
    /// the caller is never left without an active chat.
    pub fn active_chat(&self, user_id: Option<&str>) -> Result<Chat> {
        if let Some(id) = self.chats.current_chat_id()? {
            if let Some(chat) = self.find_chat(&id)? {
                return Ok(chat);
            }
        }
        self.create_chat(user_id)
    }

    /// Delete a chat from the persisted list
    ///
    /// When the deleted chat was active, a new chat is created and
    /// activated immediately; the replacement is returned so the caller
    /// can switch to it.
    pub fn delete_chat(&self, chat_id: &str, user_id: Option<&str>) -> Result<Option<Chat>> {
        let mut chats = self.chats.load_all()?;
        chats.retain(|c| c.id != chat_id);
        self.chats.save_all(&chats)?;

        if self.chats.current_chat_id()?.as_deref() == Some(chat_id) {
            let replacement = self.create_chat(user_id)?;
            return Ok(Some(replacement));
        }
        Ok(None)
    }

    /// Append a message to a chat and persist the full list
    ///
    /// If the chat's title is still the default and a user message is now
    /// present, the chat is retitled to the first user message's
    /// 30-character prefix (with a trailing ellipsis when truncated).
    /// This happens at save time, at most once per chat. Appending to a
    /// chat that no longer exists writes nothing.
    pub fn append_message(&self, chat_id: &str, message: Message) -> Result<()> {
        let mut chats = self.chats.load_all()?;
        let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) else {
            tracing::warn!("Dropping message for missing chat {}", chat_id);
            return Ok(());
        };

        chat.messages.push(message);

        if chat.title == DEFAULT_CHAT_TITLE {
            if let Some(first_user) = chat
                .messages
                .iter()
                .find(|m| m.role == MessageRole::User)
            {
                chat.title = title_from_content(&first_user.content);
            }
        }

        self.chats.save_all(&chats)
    }
}

/// Derive a chat title from message content
fn title_from_content(content: &str) -> String {
    let prefix: String = content.chars().take(TITLE_PREFIX_LEN).collect();
    if content.chars().count() > TITLE_PREFIX_LEN {
        format!("{}...", prefix)
    } else {
        prefix
    }
}
