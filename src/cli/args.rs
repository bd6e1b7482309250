//! CLI argument definitions using clap
//!
//! Commands:
//! - recordstore init [--config <path>] [--db <path>]
//! - recordstore serve [--config <path>] [--port <port>] [--db <path>]
//! - recordstore admin [--api <url>] <action>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::store::RecordId;

/// Default API base URL for the admin command
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// recordstore - A small record-keeping HTTP API backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "recordstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and schema, then exit
    Init {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the database path
        #[arg(long)]
        db: Option<String>,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the listening port
        #[arg(long)]
        port: Option<u16>,

        /// Override the database path
        #[arg(long)]
        db: Option<String>,
    },

    /// Manage records through a running API
    Admin {
        /// API base URL
        #[arg(long, default_value = DEFAULT_API_URL)]
        api: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AdminAction {
    /// Check that the API is reachable
    Health,

    /// List all records
    List,

    /// Create a record
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        amount: f64,
    },

    /// Update any subset of a record's fields
    Update {
        id: RecordId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        amount: Option<f64>,
    },

    /// Delete a record
    Delete { id: RecordId },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
