//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Property management API client
#[derive(Parser, Debug)]
#[command(name = "propman")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API base URL (overrides PROPMAN_API_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file (JSON)
    #[arg(short, long, global = true, default_value = ".propman-session.json")]
    pub session: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Apartments
    Apartments {
        #[command(subcommand)]
        action: Action,
    },

    /// Payments
    Payments {
        #[command(subcommand)]
        action: Action,
    },

    /// Users
    Users {
        #[command(subcommand)]
        action: Action,
    },

    /// Maintenance events
    Maintenance {
        #[command(subcommand)]
        action: Action,
    },

    /// Notifications
    Notifications {
        #[command(subcommand)]
        action: Action,
    },

    /// Damage reports
    DamageReports {
        #[command(subcommand)]
        action: Action,
    },

    /// Short-stay guests
    Guests {
        #[command(subcommand)]
        action: Action,
    },
}

/// Operation on a resource
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List records
    List {
        /// Only payments for this month (payments only)
        #[arg(long)]
        month: Option<String>,

        /// Only guests currently staying (guests only)
        #[arg(long)]
        active: bool,
    },

    /// Create a record from inline JSON
    Create {
        #[arg(long)]
        data: String,
    },

    /// Update a record from inline JSON
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        data: String,
    },

    /// Delete a record
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Mark a payment as paid
    Pay {
        #[arg(long)]
        id: String,
    },

    /// Change the status of a maintenance event or damage report
    Status {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },

    /// Mark a notification as read
    Read {
        #[arg(long)]
        id: String,
    },

    /// Check a guest in
    CheckIn {
        #[arg(long)]
        id: String,
    },

    /// Check a guest out
    CheckOut {
        #[arg(long)]
        id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
