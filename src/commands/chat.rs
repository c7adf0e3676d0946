//! Interactive chat view
//!
//! A readline-based loop over the active chat: plain input is submitted
//! to the mock responder, `/` commands manage chats. The pending reply is
//! guarded by a cancellation token so tearing the view down (Ctrl-C,
//! `/quit`) never writes a stale reply into a chat the user already left.

use super::special_commands::{parse_chat_command, print_help, ChatCommand};
use super::{prompt, App};
use crate::chats::ChatManager;
use crate::error::{Result, OpdeckError};
use crate::registry::ModelRegistry;
use crate::responder::{error_reply, MockResponder, Responder};
use crate::store::types::{Chat, Message, MessageRole, SessionUser};
use crate::store::{ApiKeyRepository, ModelRepository};
use colored::Colorize;
use prettytable::{format, Table};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio_util::sync::CancellationToken;

/// Start the interactive chat view
///
/// Requires a session; prompts for an API key when none is configured
/// (the analog of the original's forced key dialog).
pub async fn run_chat(app: &App, resume: Option<String>) -> Result<()> {
    let user = app.session.require_user()?;
    let chats = ChatManager::new(app.repos.chats.clone());

    ensure_api_key(app)?;

    if let Some(id) = &resume {
        let resolved = resolve_chat_id(&chats, id)?;
        chats.select_chat(&resolved)?;
    }
    let mut current = chats.active_chat(Some(&user.id))?;

    let responder = MockResponder::new(app.config.responder.reply_delay_ms);
    let cancel = CancellationToken::new();
    let mut rl = DefaultEditor::new()?;

    print_welcome(&user, &current);
    for message in &current.messages {
        render_message(message);
    }

    loop {
        match rl.readline(&format!("{} ", ">>".green())) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                rl.add_history_entry(trimmed)?;

                match parse_chat_command(trimmed) {
                    ChatCommand::New => {
                        current = chats.create_chat(Some(&user.id))?;
                        println!("Started {}\n", current.title.cyan());
                    }
                    ChatCommand::List => {
                        print_chat_list(&chats, &current.id)?;
                    }
                    ChatCommand::Switch(id) => {
                        let resolved = resolve_chat_id(&chats, &id)?;
                        let messages = chats.select_chat(&resolved)?;
                        current = chats.active_chat(Some(&user.id))?;
                        println!("Switched to {}\n", current.title.cyan());
                        for message in &messages {
                            render_message(message);
                        }
                    }
                    ChatCommand::Delete(id) => {
                        let target = match id {
                            Some(id) => resolve_chat_id(&chats, &id)?,
                            None => current.id.clone(),
                        };
                        if let Some(replacement) = chats.delete_chat(&target, Some(&user.id))? {
                            current = replacement;
                            println!("Chat deleted; started {}\n", current.title.cyan());
                        } else {
                            println!("Chat deleted.\n");
                        }
                    }
                    ChatCommand::Models => {
                        print_model_list(app)?;
                    }
                    ChatCommand::Status => {
                        print_status(app, &user, &current)?;
                    }
                    ChatCommand::Help => {
                        print_help();
                    }
                    ChatCommand::Quit => break,
                    ChatCommand::Unknown(message) => {
                        println!("{}\n", message.yellow());
                    }
                    ChatCommand::None => {
                        send_message(&chats, &responder, &cancel, &current.id, trimmed).await?;
                        // Pick up the retitle done at save time
                        current = chats.active_chat(Some(&user.id))?;
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    // View teardown: abort anything still pending
    cancel.cancel();
    println!("{}", "Bye.".dimmed());
    Ok(())
}

/// Resolve a full or 8-char-prefix chat id; unknown ids pass through
/// unchanged and select an empty chat view
fn resolve_chat_id(chats: &ChatManager, id: &str) -> Result<String> {
    Ok(chats
        .list_chats()?
        .into_iter()
        .find(|c| c.id == id || c.id.starts_with(id))
        .map(|c| c.id)
        .unwrap_or_else(|| id.to_string()))
}

/// Prompt for an API key when none is configured yet
fn ensure_api_key(app: &App) -> Result<()> {
    if app.repos.api_keys.active_key()?.is_some() {
        return Ok(());
    }

    println!(
        "{}",
        "Please set your API key to start chatting.".yellow()
    );
    let key = prompt("API key")?;
    if key.is_empty() {
        return Err(OpdeckError::ApiKeyMissing.into());
    }
    let url = app
        .repos
        .api_keys
        .active_url()?
        .unwrap_or_else(|| app.config.api.default_url.clone());
    app.repos.api_keys.set_active_key(&key)?;
    app.repos.api_keys.set_active_url(&url)?;
    Ok(())
}

/// Submit one prompt: append the user message, wait out the simulated
/// call, then append the reply (or the error message)
async fn send_message(
    chats: &ChatManager,
    responder: &MockResponder,
    cancel: &CancellationToken,
    chat_id: &str,
    input: &str,
) -> Result<()> {
    let user_message = Message::user(input);
    chats.append_message(chat_id, user_message)?;

    println!("{}", "Thinking...".dimmed());

    // One child token per message so a cancelled reply does not poison
    // the next one.
    let reply_token = cancel.child_token();

    tokio::select! {
        result = responder.respond(input, &reply_token) => {
            match result {
                Ok(reply) => {
                    render_message(&reply);
                    chats.append_message(chat_id, reply)?;
                }
                Err(e) if e.downcast_ref::<OpdeckError>()
                    .map(|e| matches!(e, OpdeckError::Cancelled))
                    .unwrap_or(false) =>
                {
                    println!("{}", "Reply cancelled.".yellow());
                }
                Err(e) => {
                    tracing::warn!("Simulated call failed: {}", e);
                    let message = error_reply();
                    render_message(&message);
                    chats.append_message(chat_id, message)?;
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            reply_token.cancel();
            println!("\n{}", "Reply cancelled.".yellow());
        }
    }

    Ok(())
}

fn print_welcome(user: &SessionUser, chat: &Chat) {
    println!();
    println!("{}", "Opdeck".bold().green());
    println!(
        "Logged in as {} | chat: {}",
        user.username.bold(),
        chat.title.cyan()
    );
    println!("Type {} for commands.\n", "/help".cyan());
}

/// Render one message with a role tag, plus its payload widgets
fn render_message(message: &Message) {
    let tag = match message.role {
        MessageRole::User => "you".bold().to_string(),
        MessageRole::Assistant => "assistant".green().bold().to_string(),
        MessageRole::System => "system".yellow().bold().to_string(),
    };
    println!("{}: {}", tag, message.content);

    if let Some(blocks) = &message.code_blocks {
        if let Some(html) = &blocks.html {
            println!("\n{}", "--- HTML ---".cyan());
            println!("{}", html);
        }
        if let Some(css) = &blocks.css {
            println!("\n{}", "--- CSS ---".cyan());
            println!("{}", css);
        }
        if let Some(js) = &blocks.js {
            println!("\n{}", "--- JavaScript ---".cyan());
            println!("{}", js);
        }
    }

    if message.show_preview {
        render_browser_mockup();
    }
    println!();
}

/// Static mock browser widget shown for preview replies
fn render_browser_mockup() {
    println!();
    println!("+--------------------------------------------------+");
    println!("| o o o  https://app.opdeck.dev/previews/           |");
    println!("+--------------------------------------------------+");
    println!("| Preview                      Session ID: 8f29a1b3 |");
    println!("|                                                   |");
    println!("| Browser Session: active                           |");
    println!("| Page content will appear here                     |");
    println!("+--------------------------------------------------+");
}

fn print_chat_list(chats: &ChatManager, current_id: &str) -> Result<()> {
    let all = chats.list_chats()?;
    if all.is_empty() {
        println!("{}", "No saved chats.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "".bold(),
        "ID".bold(),
        "Title".bold(),
        "Date".bold(),
        "Messages".bold()
    ]);

    for chat in all {
        let marker = if chat.id == current_id { "*" } else { "" };
        let id_short = chat.id.chars().take(8).collect::<String>();
        table.add_row(prettytable::row![
            marker,
            id_short.cyan(),
            chat.title,
            chat.date,
            chat.messages.len()
        ]);
    }
    table.printstd();
    println!();
    Ok(())
}

fn print_model_list(app: &App) -> Result<()> {
    let registry = ModelRegistry::new(
        app.repos.models.clone(),
        app.repos.api_keys.clone(),
        app.config.registry.fetch_delay_ms,
    );
    let selected = registry.selected()?;
    let custom = registry.custom()?;

    if custom.is_empty() {
        println!(
            "No custom models. Run {} to manage models.",
            "opdeck models list --refresh".cyan()
        );
        return Ok(());
    }
    for model in custom {
        let marker = if selected.as_deref() == Some(model.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {} ({})", marker, model.name.bold(), model.id);
    }
    println!();
    Ok(())
}

fn print_status(app: &App, user: &SessionUser, chat: &Chat) -> Result<()> {
    let key_state = if app.repos.api_keys.active_key()?.is_some() {
        "configured".green().to_string()
    } else {
        "missing".red().to_string()
    };
    let model = app
        .repos
        .models
        .selected_model()?
        .unwrap_or_else(|| "none".to_string());

    println!("User:    {} ({})", user.username, user.role);
    println!("Chat:    {} ({} messages)", chat.title, chat.messages.len());
    println!("Model:   {}", model);
    println!("API key: {}\n", key_state);
    Ok(())
}
