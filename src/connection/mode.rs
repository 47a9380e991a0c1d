use crate::args::{LauncherOptions, PartitionResult};
use crate::error::ConfigurationError;

/// How the launcher reaches its backend. Exactly one is active per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Talk over the launcher's own stdin/stdout (`--embed`).
    Embed,
    /// Attach to a running Neovim (`--server <addr>`).
    Server(String),
    /// Start `program args...` as given after `--spawn`.
    Spawn { program: String, args: Vec<String> },
    /// Start `--nvim` (or the configured default) with the files to edit.
    Default { program: String, files: Vec<String> },
}

impl ConnectionMode {
    /// Validate the parsed flags and pick the mode.
    ///
    /// Mutual exclusivity is checked before any mode-specific rule.
    pub fn select(
        options: &LauncherOptions,
        partition: &PartitionResult,
    ) -> Result<Self, ConfigurationError> {
        if options.mode_flag_count() > 1 {
            return Err(ConfigurationError::MutuallyExclusive);
        }

        let has_positional = !options.files.is_empty() || partition.positional_marker.is_some();

        if options.embed {
            if has_positional {
                return Err(ConfigurationError::PositionalArguments { flag: "--embed" });
            }
            return Ok(ConnectionMode::Embed);
        }

        if let Some(address) = &options.server {
            if has_positional {
                return Err(ConfigurationError::PositionalArguments { flag: "--server" });
            }
            return Ok(ConnectionMode::Server(address.clone()));
        }

        if options.spawn {
            let Some((program, args)) = partition.spawn_args.split_first() else {
                return Err(ConfigurationError::SpawnWithoutExecutable);
            };
            if !options.files.is_empty() {
                tracing::warn!(
                    "Ignoring files given before --spawn: {}",
                    options.files.join(" ")
                );
            }
            return Ok(ConnectionMode::Spawn {
                program: program.clone(),
                args: args.to_vec(),
            });
        }

        Ok(ConnectionMode::Default {
            program: options.nvim_program().to_string(),
            files: options.files.clone(),
        })
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionMode::Embed => "embed",
            ConnectionMode::Server(_) => "server",
            ConnectionMode::Spawn { .. } => "spawn",
            ConnectionMode::Default { .. } => "default",
        }
    }
}
