//! Launch error types.
//!
//! Every error is resolved where it is detected: configuration problems stop
//! the launch before any transport is touched, transport problems are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid combination of launcher flags and arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Options --server, --spawn and --embed are mutually exclusive")]
    MutuallyExclusive,

    #[error("{flag} does not accept positional arguments")]
    PositionalArguments { flag: &'static str },

    #[error("--spawn requires at least one positional argument")]
    SpawnWithoutExecutable,
}

/// The selected transport could not be opened.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Executable '{program}' not found")]
    ExecutableNotFound { program: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to connect to '{address}': {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend process has no {stream} pipe")]
    MissingPipe { stream: &'static str },

    #[error("Local socket '{}' is not supported on this platform", .address.display())]
    Unsupported { address: PathBuf },
}

/// Anything that stops a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// clap rejected the launcher flags, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
