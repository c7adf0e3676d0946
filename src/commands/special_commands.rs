//! Special commands parser for the interactive chat view
//!
//! Special commands let users manage chats without leaving the REPL:
//! create, list, switch, and delete chats, peek at models, and show
//! session status. Commands are prefixed with `/` and are
//! case-insensitive; anything else is submitted to the responder.

use colored::Colorize;

/// Special commands that can be executed during an interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Start a new chat and make it active
    New,

    /// List saved chats
    List,

    /// Switch to a chat by id (prefix accepted)
    Switch(String),

    /// Delete a chat by id, or the active chat when no id is given
    Delete(Option<String>),

    /// Show the combined model list
    Models,

    /// Show session, chat, and model status
    Status,

    /// Display help information
    Help,

    /// Exit the interactive session
    Quit,

    /// A `/` command that is not recognized
    Unknown(String),

    /// Not a special command; submit to the responder
    None,
}

/// Parse a line of REPL input into a special command
///
/// # Examples
///
/// ```
/// use opdeck::commands::special_commands::{parse_chat_command, ChatCommand};
///
/// assert_eq!(parse_chat_command("/new"), ChatCommand::New);
/// assert_eq!(parse_chat_command("hello"), ChatCommand::None);
/// ```
pub fn parse_chat_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return ChatCommand::None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(|a| a.trim().to_string()).filter(|a| !a.is_empty());

    match command.as_str() {
        "/new" => ChatCommand::New,
        "/list" => ChatCommand::List,
        "/switch" => match arg {
            Some(id) => ChatCommand::Switch(id),
            None => ChatCommand::Unknown("/switch requires a chat id".to_string()),
        },
        "/delete" => ChatCommand::Delete(arg),
        "/models" => ChatCommand::Models,
        "/status" => ChatCommand::Status,
        "/help" => ChatCommand::Help,
        "/quit" | "/exit" => ChatCommand::Quit,
        other => ChatCommand::Unknown(format!("Unknown command: {}", other)),
    }
}

/// Print REPL help
pub fn print_help() {
    println!("\n{}", "Available commands:".bold());
    println!("  {}            start a new chat", "/new".cyan());
    println!("  {}           list saved chats", "/list".cyan());
    println!("  {}    switch to a chat", "/switch <id>".cyan());
    println!("  {}   delete a chat (active chat when no id)", "/delete [<id>]".cyan());
    println!("  {}         list models", "/models".cyan());
    println!("  {}         show session status", "/status".cyan());
    println!("  {}           show this help", "/help".cyan());
    println!("  {}           leave the chat view", "/quit".cyan());
    println!("\nAnything else is sent as a message.\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_is_none() {
        assert_eq!(parse_chat_command("hello there"), ChatCommand::None);
        assert_eq!(parse_chat_command(""), ChatCommand::None);
    }

    #[test]
    fn test_parse_new_and_list() {
        assert_eq!(parse_chat_command("/new"), ChatCommand::New);
        assert_eq!(parse_chat_command("/list"), ChatCommand::List);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_chat_command("/NEW"), ChatCommand::New);
        assert_eq!(parse_chat_command("/Help"), ChatCommand::Help);
    }

    #[test]
    fn test_parse_switch_with_id() {
        assert_eq!(
            parse_chat_command("/switch abc123"),
            ChatCommand::Switch("abc123".to_string())
        );
    }

    #[test]
    fn test_parse_switch_without_id_is_unknown() {
        assert!(matches!(
            parse_chat_command("/switch"),
            ChatCommand::Unknown(_)
        ));
        assert!(matches!(
            parse_chat_command("/switch   "),
            ChatCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_delete_with_and_without_id() {
        assert_eq!(
            parse_chat_command("/delete abc123"),
            ChatCommand::Delete(Some("abc123".to_string()))
        );
        assert_eq!(parse_chat_command("/delete"), ChatCommand::Delete(None));
    }

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(parse_chat_command("/quit"), ChatCommand::Quit);
        assert_eq!(parse_chat_command("/exit"), ChatCommand::Quit);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(
            parse_chat_command("/frobnicate"),
            ChatCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        assert_eq!(parse_chat_command("  /new  "), ChatCommand::New);
    }
}
