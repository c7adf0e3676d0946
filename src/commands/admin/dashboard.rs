//! Admin: dashboard totals

use crate::commands::App;
use crate::error::Result;
use crate::store::{ApiKeyRepository, BotRepository, ChatRepository, UserRepository};
use colored::Colorize;
use prettytable::{format, Table};

/// Show collection totals: users, messages across all chats, bots, and
/// API key records
pub fn run_dashboard(app: &App) -> Result<()> {
    app.session.require_admin()?;

    let users = app.repos.users.load_all()?;
    let chats = app.repos.chats.load_all()?;
    let bots = app.repos.bots.load_all()?;
    let api_keys = app.repos.api_keys.load_all()?;

    let message_count: usize = chats.iter().map(|c| c.messages.len()).sum();

    println!("\n{}", "Dashboard".bold());

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Total Users".bold(), users.len()]);
    table.add_row(prettytable::row!["Total Messages".bold(), message_count]);
    table.add_row(prettytable::row!["Total Bots".bold(), bots.len()]);
    table.add_row(prettytable::row!["Total API Keys".bold(), api_keys.len()]);
    table.printstd();
    println!();
    Ok(())
}
