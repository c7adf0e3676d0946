//! Admin: user management

use super::confirm_delete;
use crate::commands::{prompt, App};
use crate::error::{Result, OpdeckError};
use crate::session::{generate_salt, hash_password};
use crate::store::types::{Role, User};
use crate::store::UserRepository;
use chrono::Utc;
use colored::Colorize;
use prettytable::{format, Table};
use uuid::Uuid;

fn parse_role(role: &str) -> Result<Role> {
    match role.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "user" => Ok(Role::User),
        other => Err(OpdeckError::Validation(format!("Unknown role: {}", other)).into()),
    }
}

fn find_user_index(users: &[User], id: &str) -> Option<usize> {
    users.iter().position(|u| u.id == id || u.id.starts_with(id))
}

/// Whether this user is the seeded admin account, exempt from edit/delete
fn is_protected(app: &App, user: &User) -> bool {
    user.email == app.config.admin.email
}

/// List all users
pub fn run_list(app: &App) -> Result<()> {
    app.session.require_admin()?;
    let users = app.repos.users.load_all()?;

    if users.is_empty() {
        println!("{}", "No users found. Add your first user to get started.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Username".bold(),
        "Email".bold(),
        "Role".bold(),
        "Created".bold()
    ]);

    for user in &users {
        let id_short = user.id.chars().take(8).collect::<String>();
        let role = match user.role {
            Role::Admin => user.role.to_string().purple().to_string(),
            Role::User => user.role.to_string(),
        };
        table.add_row(prettytable::row![
            id_short.cyan(),
            user.username,
            user.email,
            role,
            user.created_at.format("%Y-%m-%d")
        ]);
    }
    table.printstd();
    println!();
    Ok(())
}

/// Add a user
pub fn run_add(
    app: &App,
    username: &str,
    email: &str,
    password: Option<String>,
    role: &str,
) -> Result<()> {
    app.session.require_admin()?;

    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        println!("{}", "Username, email, and password are required".red());
        return Ok(());
    }
    let role = parse_role(role)?;

    let salt = generate_salt();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: hash_password(&password, &salt),
        salt,
        role,
        created_at: Utc::now(),
    };

    let mut users = app.repos.users.load_all()?;
    users.push(user);
    app.repos.users.save_all(&users)?;

    println!("{}", format!("Added user {}", username).green());
    Ok(())
}

/// Edit a user; fields left out stay unchanged, and an omitted password
/// keeps the stored one
pub fn run_edit(
    app: &App,
    id: &str,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
) -> Result<()> {
    app.session.require_admin()?;

    let mut users = app.repos.users.load_all()?;
    let Some(index) = find_user_index(&users, id) else {
        return Err(OpdeckError::NotFound(format!("user {}", id)).into());
    };

    if is_protected(app, &users[index]) {
        println!("{}", "The admin account cannot be edited.".red());
        return Ok(());
    }

    let user = &mut users[index];
    if let Some(username) = username {
        if username.trim().is_empty() {
            println!("{}", "Username must not be empty".red());
            return Ok(());
        }
        user.username = username;
    }
    if let Some(email) = email {
        if email.trim().is_empty() {
            println!("{}", "Email must not be empty".red());
            return Ok(());
        }
        user.email = email;
    }
    if let Some(password) = password {
        if !password.is_empty() {
            let salt = generate_salt();
            user.password_hash = hash_password(&password, &salt);
            user.salt = salt;
        }
    }
    if let Some(role) = role {
        user.role = parse_role(&role)?;
    }

    let username = user.username.clone();
    app.repos.users.save_all(&users)?;
    println!("{}", format!("Updated user {}", username).green());
    Ok(())
}

/// Delete a user; chats owned by the user are left untouched
pub fn run_delete(app: &App, id: &str, yes: bool) -> Result<()> {
    app.session.require_admin()?;

    let mut users = app.repos.users.load_all()?;
    let Some(index) = find_user_index(&users, id) else {
        return Err(OpdeckError::NotFound(format!("user {}", id)).into());
    };

    if is_protected(app, &users[index]) {
        println!("{}", "The admin account cannot be deleted.".red());
        return Ok(());
    }

    if !confirm_delete("user", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = users.remove(index);
    app.repos.users.save_all(&users)?;
    println!("{}", format!("Deleted user {}", removed.username).green());
    Ok(())
}
