use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LaunchEnv, LoggingConfig};

/// Filter for stderr output when no log file is configured.
const STDERR_FILTER: &str = "warn";

/// Initialize tracing.
///
/// With `NVIM_SHELL_LOG` set to a file path every diagnostic is appended to
/// that file, filtered by `RUST_LOG` or the configured filter. Otherwise only
/// warnings and errors go to stderr unless `RUST_LOG` says otherwise.
pub fn init(env: &LaunchEnv, config: &LoggingConfig) {
    let Some(log_path) = env.log_file.as_deref() else {
        init_stderr();
        return;
    };

    let file = match open_log_file(log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "Warning: Failed to open log file {}: {}",
                log_path.display(),
                e
            );
            init_stderr();
            return;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn init_stderr() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(STDERR_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}

/// Open `path` for appending, creating it when missing.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
