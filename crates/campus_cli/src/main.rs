//! `campus` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and the database.
//! - Print one JSON document per call; non-zero exit on failure.

mod args;
mod handler;

use args::{Cli, Commands};
use campus_core::db::open_db;
use campus_core::{default_log_level, init_logging};
use clap::Parser;
use handler::{handle_course, handle_info, handle_student, ErrorResponse};
use log::{error, warn};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = start_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let result = match &cli.command {
        Commands::Info => handle_info(),
        Commands::Student { command } => {
            open_database(&cli.db).and_then(|conn| handle_student(&conn, command))
        }
        Commands::Course { command } => {
            open_database(&cli.db).and_then(|conn| handle_course(&conn, command))
        }
    };

    match result {
        Ok(body) => {
            println!("{}", render(&body));
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!(
                "event=request module=cli status=error http_status={} error_code={}",
                err.status, err.error
            );
            println!("{}", render(&err));
            ExitCode::FAILURE
        }
    }
}

fn start_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let absolute = std::path::absolute(log_dir)
        .map_err(|err| format!("cannot resolve `{}`: {err}", log_dir.display()))?;
    let dir = absolute
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", absolute.display()))?;
    init_logging(level, dir)
}

fn open_database(path: &Path) -> Result<rusqlite::Connection, ErrorResponse> {
    open_db(path).map_err(|err| {
        error!("event=db_open module=cli status=error error={err}");
        ErrorResponse {
            status: 500,
            error: "storage_error",
            message: err.to_string(),
            violations: Vec::new(),
        }
    })
}

fn render<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| format!("{{\"error\":\"serialization_failed\",\"message\":\"{err}\"}}"))
}
