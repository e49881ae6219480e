//! CLI module
//!
//! Command-line interface for the property management API.
//!
//! # Commands
//!
//! - `login` - Sign in and store the session
//! - `logout` - Forget the stored session
//! - `whoami` - Show the signed-in user
//! - `<resource> <action>` - Run a resource operation

mod commands;
mod runner;

pub use commands::{Action, Cli, Commands, OutputFormat};
pub use runner::{init_logging, Resource, Runner, TerminalNavigator};
