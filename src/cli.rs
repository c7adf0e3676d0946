//! Command-line interface definition for Opdeck
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand corresponds to one view of the application: the auth
//! forms, the chat REPL, API settings, model management, and the admin
//! screens.

use clap::{Parser, Subcommand};

/// Opdeck - login-gated chat console with an admin surface
///
/// Chat with a simulated model backend and manage users, bots, API keys,
/// and messages over a local store.
#[derive(Parser, Debug, Clone)]
#[command(name = "opdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the store database path (also via OPDECK_STORE_DB)
    #[arg(long)]
    pub store: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Opdeck
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a new account (interactive form)
    Register,

    /// Log in with a username or email
    Login {
        /// Username or email
        identifier: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Start the interactive chat view
    Chat {
        /// Resume a specific chat by id instead of the active one
        #[arg(short, long)]
        resume: Option<String>,
    },

    /// Manage the active API key and URL
    Apikey {
        /// API settings subcommand
        #[command(subcommand)]
        command: ApiKeyCommand,
    },

    /// Manage models
    Models {
        /// Model management subcommand
        #[command(subcommand)]
        command: ModelCommand,
    },

    /// Admin views (require the admin role)
    Admin {
        /// Admin subcommand
        #[command(subcommand)]
        command: AdminCommand,
    },
}

/// Active API key/url management
#[derive(Subcommand, Debug, Clone)]
pub enum ApiKeyCommand {
    /// Set the active API key and URL
    Set {
        /// API key (prompted when omitted)
        #[arg(long)]
        key: Option<String>,

        /// API URL (defaults to the configured URL)
        #[arg(long)]
        url: Option<String>,
    },

    /// Show the active API settings (key masked)
    Show,
}

/// Model management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModelCommand {
    /// List models from both pools
    List {
        /// Run the simulated fetch before listing
        #[arg(long)]
        refresh: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a custom model
    Add {
        /// Model identifier (e.g. yescale/custom-model)
        id: String,

        /// Display name
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a custom model
    Remove {
        /// Model identifier
        id: String,
    },

    /// Select the model to chat with
    Use {
        /// Model identifier
        id: String,
    },
}

/// Admin views
#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommand {
    /// Show collection totals
    Dashboard,

    /// Manage user accounts
    Users {
        /// Users subcommand
        #[command(subcommand)]
        command: UserAdminCommand,
    },

    /// Manage bots
    Bots {
        /// Bots subcommand
        #[command(subcommand)]
        command: BotAdminCommand,
    },

    /// Manage stored API key records
    Keys {
        /// Keys subcommand
        #[command(subcommand)]
        command: KeyAdminCommand,
    },

    /// Manage messages across all chats
    Messages {
        /// Messages subcommand
        #[command(subcommand)]
        command: MessageAdminCommand,
    },
}

/// Admin: user management
#[derive(Subcommand, Debug, Clone)]
pub enum UserAdminCommand {
    /// List all users
    List,

    /// Add a user
    Add {
        /// Login name
        #[arg(long)]
        username: String,

        /// Login email
        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Role: user or admin
        #[arg(long, default_value = "user")]
        role: String,
    },

    /// Edit a user (fields left out stay unchanged)
    Edit {
        /// User id
        id: String,

        /// New login name
        #[arg(long)]
        username: Option<String>,

        /// New login email
        #[arg(long)]
        email: Option<String>,

        /// New password (stored password kept when omitted)
        #[arg(long)]
        password: Option<String>,

        /// New role: user or admin
        #[arg(long)]
        role: Option<String>,
    },

    /// Delete a user
    Delete {
        /// User id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Admin: bot management
#[derive(Subcommand, Debug, Clone)]
pub enum BotAdminCommand {
    /// List all bots
    List,

    /// Add a bot
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: String,

        /// System prompt
        #[arg(long)]
        system_prompt: String,

        /// Create the bot as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a bot (fields left out stay unchanged)
    Edit {
        /// Bot id
        id: String,

        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New model identifier
        #[arg(long)]
        model: Option<String>,

        /// New system prompt
        #[arg(long)]
        system_prompt: Option<String>,

        /// New active flag
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a bot
    Delete {
        /// Bot id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Admin: stored API key records
#[derive(Subcommand, Debug, Clone)]
pub enum KeyAdminCommand {
    /// List all key records
    List {
        /// Show full key material instead of the masked form
        #[arg(long)]
        reveal: bool,
    },

    /// Add a key record
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Key material (prompted when omitted)
        #[arg(long)]
        key: Option<String>,

        /// Provider label
        #[arg(long, default_value = "yescale")]
        provider: String,
    },

    /// Delete a key record
    Delete {
        /// Record id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Admin: messages across all chats
#[derive(Subcommand, Debug, Clone)]
pub enum MessageAdminCommand {
    /// List messages across all chats, newest first
    List {
        /// Filter by content substring
        #[arg(long)]
        search: Option<String>,

        /// Filter by role: user, assistant, or system
        #[arg(long)]
        role: Option<String>,
    },

    /// Edit a message's content
    Edit {
        /// Message id
        id: String,

        /// New content
        #[arg(long)]
        content: String,
    },

    /// Delete a message
    Delete {
        /// Message id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::try_parse_from(["opdeck", "login", "alice"]).unwrap();
        if let Commands::Login {
            identifier,
            password,
        } = cli.command
        {
            assert_eq!(identifier, "alice");
            assert!(password.is_none());
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_chat_with_resume() {
        let cli = Cli::try_parse_from(["opdeck", "chat", "--resume", "abc123"]).unwrap();
        if let Commands::Chat { resume } = cli.command {
            assert_eq!(resume.as_deref(), Some("abc123"));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_models_list_with_flags() {
        let cli = Cli::try_parse_from(["opdeck", "models", "list", "--refresh", "--json"]).unwrap();
        if let Commands::Models {
            command: ModelCommand::List { refresh, json },
        } = cli.command
        {
            assert!(refresh);
            assert!(json);
        } else {
            panic!("Expected Models List command");
        }
    }

    #[test]
    fn test_cli_parse_models_add_with_description() {
        let cli = Cli::try_parse_from([
            "opdeck",
            "models",
            "add",
            "yescale/custom",
            "Custom",
            "--description",
            "My model",
        ])
        .unwrap();
        if let Commands::Models {
            command: ModelCommand::Add {
                id,
                name,
                description,
            },
        } = cli.command
        {
            assert_eq!(id, "yescale/custom");
            assert_eq!(name, "Custom");
            assert_eq!(description.as_deref(), Some("My model"));
        } else {
            panic!("Expected Models Add command");
        }
    }

    #[test]
    fn test_cli_parse_admin_users_add() {
        let cli = Cli::try_parse_from([
            "opdeck", "admin", "users", "add", "--username", "bob", "--email", "bob@x.com",
            "--password", "password1",
        ])
        .unwrap();
        if let Commands::Admin {
            command:
                AdminCommand::Users {
                    command:
                        UserAdminCommand::Add {
                            username,
                            email,
                            password,
                            role,
                        },
                },
        } = cli.command
        {
            assert_eq!(username, "bob");
            assert_eq!(email, "bob@x.com");
            assert_eq!(password.as_deref(), Some("password1"));
            assert_eq!(role, "user");
        } else {
            panic!("Expected Admin Users Add command");
        }
    }

    #[test]
    fn test_cli_parse_admin_delete_with_yes() {
        let cli =
            Cli::try_parse_from(["opdeck", "admin", "bots", "delete", "bot-1", "--yes"]).unwrap();
        if let Commands::Admin {
            command: AdminCommand::Bots {
                command: BotAdminCommand::Delete { id, yes },
            },
        } = cli.command
        {
            assert_eq!(id, "bot-1");
            assert!(yes);
        } else {
            panic!("Expected Admin Bots Delete command");
        }
    }

    #[test]
    fn test_cli_parse_admin_messages_list_filters() {
        let cli = Cli::try_parse_from([
            "opdeck", "admin", "messages", "list", "--search", "hello", "--role", "user",
        ])
        .unwrap();
        if let Commands::Admin {
            command: AdminCommand::Messages {
                command: MessageAdminCommand::List { search, role },
            },
        } = cli.command
        {
            assert_eq!(search.as_deref(), Some("hello"));
            assert_eq!(role.as_deref(), Some("user"));
        } else {
            panic!("Expected Admin Messages List command");
        }
    }

    #[test]
    fn test_cli_parse_apikey_set() {
        let cli = Cli::try_parse_from(["opdeck", "apikey", "set", "--key", "sk-demo"]).unwrap();
        if let Commands::Apikey {
            command: ApiKeyCommand::Set { key, url },
        } = cli.command
        {
            assert_eq!(key.as_deref(), Some("sk-demo"));
            assert!(url.is_none());
        } else {
            panic!("Expected Apikey Set command");
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["opdeck"]).is_err());
    }

    #[test]
    fn test_cli_store_override_flag() {
        let cli =
            Cli::try_parse_from(["opdeck", "--store", "/tmp/test.db", "whoami"]).unwrap();
        assert_eq!(cli.store.as_deref(), Some("/tmp/test.db"));
    }
}
