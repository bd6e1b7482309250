//! CLI module for recordstore
//!
//! Provides command-line interface for:
//! - init: Create the database and schema
//! - serve: Run the HTTP API
//! - admin: Manage records through a running API

mod args;
mod commands;
mod errors;
mod io;

pub use args::{AdminAction, Cli, Command, DEFAULT_API_URL};
pub use commands::{admin, init, load_config, run, run_admin, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
