//! Auth command handlers: register, login, logout, whoami

use super::{prompt, App};
use crate::chats::ChatManager;
use crate::error::Result;
use colored::Colorize;

/// Interactive registration form
///
/// Prompts for the same fields as the registration view and surfaces
/// validation failures inline. On success the user is pointed at login,
/// mirroring the original's redirect.
pub fn run_register(app: &App) -> Result<()> {
    println!("{}", "Create your account".bold());

    let username = prompt("Username")?;
    let email = prompt("Email address")?;
    let password = prompt("Password")?;
    let confirm_password = prompt("Confirm password")?;

    match app
        .session
        .register(&username, &email, &password, &confirm_password)
    {
        Ok(user) => {
            println!(
                "{}",
                "Registration successful! You can now log in.".green()
            );
            println!("Run {} to sign in.", format!("opdeck login {}", user.username).cyan());
            Ok(())
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(())
        }
    }
}

/// Log in and land on the chat view's state
///
/// On success an active chat is ensured (created when none exists), so
/// the next `opdeck chat` opens exactly where the original's redirect
/// landed.
pub fn run_login(app: &App, identifier: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };

    match app.session.login(identifier, &password) {
        Ok(session) => {
            println!("{}", format!("Logged in as {}", session.username).green());

            let chats = ChatManager::new(app.repos.chats.clone());
            let active = chats.active_chat(Some(&session.id))?;
            println!(
                "Active chat: {} ({} messages)",
                active.title.cyan(),
                active.messages.len()
            );
            println!("Run {} to start chatting.", "opdeck chat".cyan());
            Ok(())
        }
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(())
        }
    }
}

/// Clear the session
pub fn run_logout(app: &App) -> Result<()> {
    app.session.logout()?;
    println!("{}", "Logged out.".green());
    Ok(())
}

/// Show the current session
pub fn run_whoami(app: &App) -> Result<()> {
    match app.session.current_user()? {
        Some(session) => {
            println!("{} ({})", session.username.bold(), session.role);
            if let Some(email) = &session.email {
                println!("{}", email);
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
