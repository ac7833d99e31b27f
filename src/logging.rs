//! Tracing setup for the server and the command-line tool.
//!
//! Events are written to stdout in compact form and mirrored, without ANSI colors, to a log file
//! at `DOCSUM_LOG_FILE` (or `logs/docsum.log`). `RUST_LOG` controls filtering.
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_ENV: &str = "DOCSUM_LOG_FILE";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_NAME: &str = "docsum.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();
    let file_layer = file_writer().map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();
}

/// Where the file layer writes; an explicit path wins over the default location.
fn log_file_path(explicit: Option<String>) -> PathBuf {
    match explicit.filter(|value| !value.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => Path::new(DEFAULT_LOG_DIR).join(DEFAULT_LOG_NAME),
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn file_writer() -> Option<NonBlocking> {
    let path = log_file_path(std::env::var(LOG_FILE_ENV).ok());
    match open_append(&path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("File logging disabled, cannot open {}: {err}", path.display());
            None
        }
    }
}
