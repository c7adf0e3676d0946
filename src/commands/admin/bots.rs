//! Admin: bot management
//!
//! Bots are pure configuration records. An empty collection is seeded
//! with the three default bots the first time the view loads.

use super::confirm_delete;
use crate::commands::App;
use crate::error::{Result, OpdeckError};
use crate::store::types::Bot;
use crate::store::BotRepository;
use chrono::Utc;
use colored::Colorize;
use prettytable::{format, Table};
use uuid::Uuid;

fn default_bots() -> Vec<Bot> {
    let now = Utc::now();
    vec![
        Bot {
            id: Uuid::new_v4().to_string(),
            name: "Web Browser".to_string(),
            description: "A bot that can browse the web and extract information".to_string(),
            model: "yescale/llama-3-70b-instruct".to_string(),
            system_prompt: "You are a helpful web browsing assistant. You can navigate websites and extract information for the user.".to_string(),
            is_active: true,
            created_at: now,
        },
        Bot {
            id: Uuid::new_v4().to_string(),
            name: "Code Assistant".to_string(),
            description: "A bot specialized in writing and explaining code".to_string(),
            model: "yescale/llama-3-70b-instruct".to_string(),
            system_prompt: "You are a coding assistant. Help users write, debug, and understand code in various programming languages.".to_string(),
            is_active: true,
            created_at: now,
        },
        Bot {
            id: Uuid::new_v4().to_string(),
            name: "Research Helper".to_string(),
            description: "A bot that helps with research and summarization".to_string(),
            model: "yescale/mixtral-8x7b-instruct".to_string(),
            system_prompt: "You are a research assistant. Help users find information, summarize content, and organize research materials.".to_string(),
            is_active: false,
            created_at: now,
        },
    ]
}

/// Load bots, seeding the defaults when the collection is empty
fn load_seeded(app: &App) -> Result<Vec<Bot>> {
    let bots = app.repos.bots.load_all()?;
    if !bots.is_empty() {
        return Ok(bots);
    }
    let defaults = default_bots();
    app.repos.bots.save_all(&defaults)?;
    tracing::debug!("Seeded {} default bots", defaults.len());
    Ok(defaults)
}

fn find_bot_index(bots: &[Bot], id: &str) -> Option<usize> {
    bots.iter().position(|b| b.id == id || b.id.starts_with(id))
}

/// List all bots
pub fn run_list(app: &App) -> Result<()> {
    app.session.require_admin()?;
    let bots = load_seeded(app)?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Model".bold(),
        "Active".bold(),
        "Description".bold()
    ]);

    for bot in &bots {
        let id_short = bot.id.chars().take(8).collect::<String>();
        let active = if bot.is_active {
            "yes".green().to_string()
        } else {
            "no".yellow().to_string()
        };
        table.add_row(prettytable::row![
            id_short.cyan(),
            bot.name,
            bot.model,
            active,
            bot.description
        ]);
    }
    table.printstd();
    println!();
    Ok(())
}

/// Add a bot
pub fn run_add(
    app: &App,
    name: &str,
    description: Option<String>,
    model: &str,
    system_prompt: &str,
    is_active: bool,
) -> Result<()> {
    app.session.require_admin()?;

    if name.trim().is_empty() || model.trim().is_empty() || system_prompt.trim().is_empty() {
        println!("{}", "Name, model, and system prompt are required".red());
        return Ok(());
    }

    let mut bots = load_seeded(app)?;
    bots.push(Bot {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.unwrap_or_default(),
        model: model.to_string(),
        system_prompt: system_prompt.to_string(),
        is_active,
        created_at: Utc::now(),
    });
    app.repos.bots.save_all(&bots)?;

    println!("{}", format!("Added bot {}", name).green());
    Ok(())
}

/// Edit a bot; fields left out stay unchanged
pub fn run_edit(
    app: &App,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    model: Option<String>,
    system_prompt: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    app.session.require_admin()?;

    let mut bots = load_seeded(app)?;
    let Some(index) = find_bot_index(&bots, id) else {
        return Err(OpdeckError::NotFound(format!("bot {}", id)).into());
    };

    let bot = &mut bots[index];
    if let Some(name) = name {
        if name.trim().is_empty() {
            println!("{}", "Name must not be empty".red());
            return Ok(());
        }
        bot.name = name;
    }
    if let Some(description) = description {
        bot.description = description;
    }
    if let Some(model) = model {
        if model.trim().is_empty() {
            println!("{}", "Model must not be empty".red());
            return Ok(());
        }
        bot.model = model;
    }
    if let Some(system_prompt) = system_prompt {
        if system_prompt.trim().is_empty() {
            println!("{}", "System prompt must not be empty".red());
            return Ok(());
        }
        bot.system_prompt = system_prompt;
    }
    if let Some(active) = active {
        bot.is_active = active;
    }

    let name = bot.name.clone();
    app.repos.bots.save_all(&bots)?;
    println!("{}", format!("Updated bot {}", name).green());
    Ok(())
}

/// Delete a bot
pub fn run_delete(app: &App, id: &str, yes: bool) -> Result<()> {
    app.session.require_admin()?;

    let mut bots = load_seeded(app)?;
    let Some(index) = find_bot_index(&bots, id) else {
        return Err(OpdeckError::NotFound(format!("bot {}", id)).into());
    };

    if !confirm_delete("bot", yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = bots.remove(index);
    app.repos.bots.save_all(&bots)?;
    println!("{}", format!("Deleted bot {}", removed.name).green());
    Ok(())
}
