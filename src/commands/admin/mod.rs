//! Admin views: dashboard, users, bots, API key records, messages
//!
//! Every handler re-checks the session and the admin role before touching
//! a collection, the CLI analog of the admin layout guard. Deletes ask
//! for confirmation unless `--yes` was passed.

use super::{confirm, App};
use crate::cli::{AdminCommand, BotAdminCommand, KeyAdminCommand, MessageAdminCommand, UserAdminCommand};
use crate::error::Result;

pub mod bots;
pub mod dashboard;
pub mod keys;
pub mod messages;
pub mod users;

/// Dispatch an admin subcommand
pub fn run_admin(app: &App, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Dashboard => dashboard::run_dashboard(app),
        AdminCommand::Users { command } => match command {
            UserAdminCommand::List => users::run_list(app),
            UserAdminCommand::Add {
                username,
                email,
                password,
                role,
            } => users::run_add(app, &username, &email, password, &role),
            UserAdminCommand::Edit {
                id,
                username,
                email,
                password,
                role,
            } => users::run_edit(app, &id, username, email, password, role),
            UserAdminCommand::Delete { id, yes } => users::run_delete(app, &id, yes),
        },
        AdminCommand::Bots { command } => match command {
            BotAdminCommand::List => bots::run_list(app),
            BotAdminCommand::Add {
                name,
                description,
                model,
                system_prompt,
                inactive,
            } => bots::run_add(app, &name, description, &model, &system_prompt, !inactive),
            BotAdminCommand::Edit {
                id,
                name,
                description,
                model,
                system_prompt,
                active,
            } => bots::run_edit(app, &id, name, description, model, system_prompt, active),
            BotAdminCommand::Delete { id, yes } => bots::run_delete(app, &id, yes),
        },
        AdminCommand::Keys { command } => match command {
            KeyAdminCommand::List { reveal } => keys::run_list(app, reveal),
            KeyAdminCommand::Add {
                name,
                key,
                provider,
            } => keys::run_add(app, &name, key, &provider),
            KeyAdminCommand::Delete { id, yes } => keys::run_delete(app, &id, yes),
        },
        AdminCommand::Messages { command } => match command {
            MessageAdminCommand::List { search, role } => {
                messages::run_list(app, search.as_deref(), role.as_deref())
            }
            MessageAdminCommand::Edit { id, content } => messages::run_edit(app, &id, &content),
            MessageAdminCommand::Delete { id, yes } => messages::run_delete(app, &id, yes),
        },
    }
}

/// Shared delete gate: `--yes` skips the prompt
pub(crate) fn confirm_delete(what: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    confirm(&format!(
        "Are you sure you want to delete this {}? This action cannot be undone.",
        what
    ))
}
