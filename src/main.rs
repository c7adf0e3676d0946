//! Opdeck - login-gated chat console
//!
#![doc = "Opdeck - login-gated chat console with an admin surface"]
#![doc = "Main entry point for the Opdeck application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use opdeck::cli::{ApiKeyCommand, Cli, Commands, ModelCommand};
use opdeck::commands::{self, App};
use opdeck::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a store path on the CLI, mirror it into
    // OPDECK_STORE_DB so the store initializer can pick it up. This keeps
    // callers unchanged while allowing `KvStore::new()` to honor an
    // override.
    if let Some(store_path) = &cli.store {
        std::env::set_var("OPDECK_STORE_DB", store_path);
        tracing::info!("Using store DB override from CLI: {}", store_path);
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Wire the store, repositories, and session; seeds the admin account
    let app = App::new(config)?;

    // Execute command
    match cli.command {
        Commands::Register => commands::auth::run_register(&app),
        Commands::Login {
            identifier,
            password,
        } => commands::auth::run_login(&app, &identifier, password),
        Commands::Logout => commands::auth::run_logout(&app),
        Commands::Whoami => commands::auth::run_whoami(&app),
        Commands::Chat { resume } => {
            tracing::info!("Starting interactive chat view");
            commands::chat::run_chat(&app, resume).await
        }
        Commands::Apikey { command } => match command {
            ApiKeyCommand::Set { key, url } => commands::apikey::run_set(&app, key, url),
            ApiKeyCommand::Show => commands::apikey::run_show(&app),
        },
        Commands::Models { command } => match command {
            ModelCommand::List { refresh, json } => {
                commands::models::run_list(&app, refresh, json).await
            }
            ModelCommand::Add {
                id,
                name,
                description,
            } => commands::models::run_add(&app, &id, &name, description.as_deref()),
            ModelCommand::Remove { id } => commands::models::run_remove(&app, &id),
            ModelCommand::Use { id } => commands::models::run_use(&app, &id).await,
        },
        Commands::Admin { command } => {
            tracing::info!("Starting admin view");
            commands::admin::run_admin(&app, command)
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "opdeck=debug" } else { "opdeck=info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
