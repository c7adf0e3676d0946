//! Opdeck - login-gated chat console library
//!
//! This library provides the core functionality for the Opdeck demo
//! application: session handling, chat management, the mock responder,
//! the mock model registry, and the persisted collections behind them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `store`: the embedded key/value store, entity types, and repository traits
//! - `session`: registration, login, and the command guards
//! - `chats`: the ordered chat list and message appending
//! - `responder`: the keyword-triggered mock responder
//! - `registry`: the mock model registry (fetched + custom pools)
//! - `commands`: CLI view handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use opdeck::commands::App;
//! use opdeck::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let app = App::new(config)?;
//!     let session = app.session.current_user()?;
//!     println!("logged in: {}", session.is_some());
//!     Ok(())
//! }
//! ```

pub mod chats;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod responder;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use chats::ChatManager;
pub use config::Config;
pub use error::{OpdeckError, Result};
pub use registry::ModelRegistry;
pub use responder::{MockResponder, Responder};
pub use session::SessionManager;
