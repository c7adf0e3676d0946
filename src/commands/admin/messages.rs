//! Admin: messages across all chats
//!
//! Messages live nested inside their parent chats. The list view
//! flattens every chat's messages (annotated with the parent chat id,
//! title, and owning user), newest first; edit and delete locate the
//! parent chat again and re-nest the change before persisting.

use super::confirm_delete;
use crate::commands::App;
use crate::error::{Result, OpdeckError};
use crate::store::types::{Chat, MessageRole};
use crate::store::ChatRepository;
use colored::Colorize;
use prettytable::{format, Table};

/// A message denormalized out of its parent chat for display
#[derive(Debug, Clone)]
pub struct FlatMessage {
    /// Message id
    pub id: String,
    /// Message text
    pub content: String,
    /// Sender role
    pub role: MessageRole,
    /// Parent chat id
    pub chat_id: String,
    /// Parent chat title
    pub chat_title: String,
    /// Owning user of the parent chat, when known
    pub user_id: Option<String>,
    /// Message creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Flatten all chats' messages, newest first
pub fn flatten_messages(chats: &[Chat]) -> Vec<FlatMessage> {
    let mut all: Vec<FlatMessage> = chats
        .iter()
        .flat_map(|chat| {
            chat.messages.iter().map(|msg| FlatMessage {
                id: msg.id.clone(),
                content: msg.content.clone(),
                role: msg.role,
                chat_id: chat.id.clone(),
                chat_title: chat.title.clone(),
                user_id: chat.user_id.clone(),
                created_at: msg.created_at,
            })
        })
        .collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all
}

/// Locate a message by id (prefix accepted): (chat index, message index)
fn find_message(chats: &[Chat], id: &str) -> Option<(usize, usize)> {
    for (chat_index, chat) in chats.iter().enumerate() {
        if let Some(msg_index) = chat
            .messages
            .iter()
            .position(|m| m.id == id || m.id.starts_with(id))
        {
            return Some((chat_index, msg_index));
        }
    }
    None
}

fn parse_role_filter(role: &str) -> Result<Option<MessageRole>> {
    match role.to_lowercase().as_str() {
        "all" => Ok(None),
        "user" => Ok(Some(MessageRole::User)),
        "assistant" => Ok(Some(MessageRole::Assistant)),
        "system" => Ok(Some(MessageRole::System)),
        other => Err(OpdeckError::Validation(format!("Unknown role filter: {}", other)).into()),
    }
}

fn truncate(content: &str, max: usize) -> String {
    let prefix: String = content.chars().take(max).collect();
    if content.chars().count() > max {
        format!("{}...", prefix)
    } else {
        prefix
    }
}

/// List messages across all chats with optional content/role filters
pub fn run_list(app: &App, search: Option<&str>, role: Option<&str>) -> Result<()> {
    app.session.require_admin()?;

    let chats = app.repos.chats.load_all()?;
    let role_filter = match role {
        Some(r) => parse_role_filter(r)?,
        None => None,
    };
    let search_lower = search.map(|s| s.to_lowercase());

    let messages: Vec<FlatMessage> = flatten_messages(&chats)
        .into_iter()
        .filter(|m| {
            let matches_search = search_lower
                .as_ref()
                .map(|s| m.content.to_lowercase().contains(s))
                .unwrap_or(true);
            let matches_role = role_filter.map(|r| m.role == r).unwrap_or(true);
            matches_search && matches_role
        })
        .collect();

    if messages.is_empty() {
        println!("{}", "No messages found.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Role".bold(),
        "Content".bold(),
        "Chat".bold(),
        "User".bold(),
        "When".bold()
    ]);

    for message in &messages {
        let id_short = message.id.chars().take(8).collect::<String>();
        let user = message
            .user_id
            .as_ref()
            .map(|u| u.chars().take(8).collect::<String>())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(prettytable::row![
            id_short.cyan(),
            message.role,
            truncate(&message.content, 40),
            truncate(&message.chat_title, 20),
            user,
            message.created_at.format("%Y-%m-%d %H:%M")
        ]);
    }
    table.printstd();
    println!();
    Ok(())
}

/// Edit a message's content, re-nesting it into its parent chat
pub fn run_edit(app: &App, id: &str, content: &str) -> Result<()> {
    app.session.require_admin()?;

    if content.trim().is_empty() {
        println!("{}", "Content must not be empty".red());
        return Ok(());
    }

    let mut chats = app.repos.chats.load_all()?;
    let Some((chat_index, msg_index)) = find_message(&chats, id) else {
        return Err(OpdeckError::NotFound(format!("message {}", id)).into());
    };

    chats[chat_index].messages[msg_index].content = content.to_string();
    app.repos.chats.save_all(&chats)?;

    println!("{}", "Message updated.".green());
    Ok(())
}

/// Delete a message from its parent chat
pub fn run_delete(app: &App, id: &str, yes: bool) -> Result<()> {
    app.session.require_admin()?;

    let mut chats = app.repos.chats.load_all()?;
    let Some((chat_index, msg_index)) = find_message(&chats, id) else {
        return Err(OpdeckError::NotFound(format!("message {}", id)).into());
    };

    if !confirm_delete("message", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    chats[chat_index].messages.remove(msg_index);
    app.repos.chats.save_all(&chats)?;

    println!("{}", "Message deleted.".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::Message;

    fn chat_with_messages(title: &str, user_id: Option<&str>, contents: &[&str]) -> Chat {
        let mut chat = Chat::new(user_id.map(|u| u.to_string()));
        chat.title = title.to_string();
        for content in contents {
            chat.messages.push(Message::user(*content));
        }
        chat
    }

    #[test]
    fn test_flatten_annotates_parent_chat() {
        let chats = vec![
            chat_with_messages("First", Some("user-1"), &["a", "b"]),
            chat_with_messages("Second", None, &["c"]),
        ];

        let flat = flatten_messages(&chats);
        assert_eq!(flat.len(), 3);

        let from_first: Vec<_> = flat.iter().filter(|m| m.chat_title == "First").collect();
        assert_eq!(from_first.len(), 2);
        assert!(from_first.iter().all(|m| m.chat_id == chats[0].id));
        assert!(from_first
            .iter()
            .all(|m| m.user_id.as_deref() == Some("user-1")));

        let from_second: Vec<_> = flat.iter().filter(|m| m.chat_title == "Second").collect();
        assert_eq!(from_second.len(), 1);
        assert!(from_second[0].user_id.is_none());
    }

    #[test]
    fn test_flatten_sorts_newest_first() {
        let mut older = Message::user("older");
        older.created_at = chrono::Utc::now() - chrono::Duration::minutes(5);
        let newer = Message::user("newer");

        let mut chat = Chat::new(None);
        chat.messages.push(older);
        chat.messages.push(newer);

        let flat = flatten_messages(&[chat]);
        assert_eq!(flat[0].content, "newer");
        assert_eq!(flat[1].content, "older");
    }

    #[test]
    fn test_find_message_locates_correct_chat() {
        let chats = vec![
            chat_with_messages("First", None, &["a"]),
            chat_with_messages("Second", None, &["b", "c"]),
        ];

        let target = chats[1].messages[1].id.clone();
        let (chat_index, msg_index) = find_message(&chats, &target).unwrap();
        assert_eq!(chat_index, 1);
        assert_eq!(msg_index, 1);
    }

    #[test]
    fn test_find_message_accepts_prefix() {
        let chats = vec![chat_with_messages("First", None, &["a"])];
        let prefix: String = chats[0].messages[0].id.chars().take(8).collect();
        assert!(find_message(&chats, &prefix).is_some());
    }

    #[test]
    fn test_find_message_missing_id() {
        let chats = vec![chat_with_messages("First", None, &["a"])];
        assert!(find_message(&chats, "not-an-id").is_none());
    }

    #[test]
    fn test_parse_role_filter() {
        assert_eq!(parse_role_filter("all").unwrap(), None);
        assert_eq!(parse_role_filter("User").unwrap(), Some(MessageRole::User));
        assert_eq!(
            parse_role_filter("assistant").unwrap(),
            Some(MessageRole::Assistant)
        );
        assert!(parse_role_filter("bogus").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 40), "short");
        let long = "x".repeat(45);
        assert_eq!(truncate(&long, 40), format!("{}...", "x".repeat(40)));
    }
}
