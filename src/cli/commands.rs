//! CLI command implementations
//!
//! `init` and `serve` load configuration, apply command-line overrides and
//! open the store. `admin` is a thin client over the HTTP API and holds no
//! database handle of its own.

use std::path::Path;

use serde_json::{json, Value};

use crate::client::{AdminClient, RecordChanges, RecordDraft};
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::store::{open_store, SharedStore};

use super::args::{AdminAction, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, db } => init(config.as_deref(), db),
        Command::Serve { config, port, db } => serve(config.as_deref(), port, db),
        Command::Admin { api, action } => admin(&api, action),
    }
}

/// Load the config file (or defaults), apply overrides and set the log level
pub fn load_config(
    config_path: Option<&Path>,
    port: Option<u16>,
    db: Option<String>,
) -> CliResult<ServerConfig> {
    log_event(Event::BootStart);

    let mut config = match config_path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(db) = db {
        config.database_path = db;
    }
    config.validate()?;

    Logger::set_min_severity(config.log_severity()?);

    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("source", source.as_str()),
            ("database_path", config.database_path.as_str()),
        ],
    );

    Ok(config)
}

fn open_configured_store(config: &ServerConfig) -> CliResult<SharedStore> {
    match open_store(&config.database_path, config.busy_timeout()) {
        Ok(store) => {
            log_event_with_fields(
                Event::StoreOpened,
                &[("database_path", config.database_path.as_str())],
            );
            Ok(store)
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(
                Event::StoreOpenFailed,
                &[
                    ("database_path", config.database_path.as_str()),
                    ("error", reason.as_str()),
                ],
            );
            Err(CliError::boot_failed(format!(
                "Failed to open database '{}': {}",
                config.database_path, reason
            )))
        }
    }
}

/// Create the database file and schema, then print the effective config
///
/// Idempotent: an existing database keeps its records.
pub fn init(config_path: Option<&Path>, db: Option<String>) -> CliResult<()> {
    let config = load_config(config_path, None, db)?;
    open_configured_store(&config)?;
    write_response(describe_config(&config))
}

/// Start the HTTP API and block until Ctrl-C
pub fn serve(config_path: Option<&Path>, port: Option<u16>, db: Option<String>) -> CliResult<()> {
    let config = load_config(config_path, port, db)?;
    let store = open_configured_store(&config)?;
    let server = HttpServer::new(config, store)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run one admin action against a running API
///
/// The outcome is written to stdout as a JSON envelope. Failures are also
/// returned so the process exits non-zero.
pub fn admin(api: &str, action: AdminAction) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    match rt.block_on(run_admin(api, action)) {
        Ok(data) => write_response(data),
        Err(err) => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
    }
}

/// Execute an admin action and return its JSON payload
pub async fn run_admin(api: &str, action: AdminAction) -> CliResult<Value> {
    let client = AdminClient::new(api)?;
    client.ensure_reachable().await?;

    let data = match action {
        AdminAction::Health => serde_json::to_value(client.health().await?)?,
        AdminAction::List => serde_json::to_value(client.list().await?)?,
        AdminAction::Create {
            name,
            category,
            amount,
        } => {
            let draft = RecordDraft::new(name, category, amount);
            serde_json::to_value(client.create(&draft).await?)?
        }
        AdminAction::Update {
            id,
            name,
            category,
            amount,
        } => {
            let changes = RecordChanges {
                name,
                category,
                amount,
            };
            serde_json::to_value(client.update(id, &changes).await?)?
        }
        AdminAction::Delete { id } => serde_json::to_value(client.delete(id).await?)?,
    };

    Ok(data)
}

/// Effective settings after overrides
pub fn describe_config(config: &ServerConfig) -> Value {
    json!({
        "database_path": config.database_path,
        "host": config.host,
        "port": config.port,
        "cors_origins": config.cors_origins,
        "list_order": config.list_order.to_string(),
    })
}
