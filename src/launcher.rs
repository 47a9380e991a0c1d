//! Launch orchestration: raw arguments in, live connection out.

use crate::args::{partition, LauncherOptions, PartitionResult, WindowOptions};
use crate::config::Config;
use crate::connection::{self, Connection, ConnectionMode};
use crate::error::LaunchError;
use crate::runtime::RuntimePathResolver;

/// Everything decided before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub options: LauncherOptions,
    pub partition: PartitionResult,
    pub mode: ConnectionMode,
}

/// What the presentation layer receives once the backend is reachable.
#[derive(Debug)]
pub struct Handoff {
    pub connection: Connection,
    pub files: Vec<String>,
    pub window: WindowOptions,
}

/// Partition `raw`, parse the launcher flags and validate the mode.
///
/// `raw` excludes the program name.
pub fn plan(raw: &[String], config: &Config) -> Result<LaunchPlan, LaunchError> {
    let partition = partition(raw);
    let options = LauncherOptions::parse_launcher_args(&partition.launcher_args)?
        .with_config(config);
    let mode = ConnectionMode::select(&options, &partition)?;

    tracing::debug!(mode = mode.name(), "Launch plan ready");
    Ok(LaunchPlan {
        options,
        partition,
        mode,
    })
}

impl LaunchPlan {
    /// Open the connection and package it for the presentation layer.
    pub async fn establish(self, resolver: &RuntimePathResolver) -> Result<Handoff, LaunchError> {
        let files = self.options.files.clone();
        let window = self.options.window();
        let connection = connection::establish(self.mode, &self.partition, resolver).await?;
        Ok(Handoff {
            connection,
            files,
            window,
        })
    }
}
