//! Launcher flag declaration.

use clap::{CommandFactory, Parser};

use crate::config::Config;

/// Backend executable used when neither `--nvim` nor the config file names one.
pub const DEFAULT_NVIM: &str = "nvim";

/// Neovim front-end launcher
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "nvim-shell", version)]
#[command(about = "Neovim front-end launcher", long_about = None)]
#[command(after_help = "Additional arguments after -- are forwarded to Neovim.")]
pub struct LauncherOptions {
    /// nvim executable path
    #[arg(long, value_name = "NVIM_PATH")]
    pub nvim: Option<String>,

    /// Initial window geometry
    #[arg(long, value_name = "GEOMETRY")]
    pub geometry: Option<String>,

    /// Maximize the window on startup
    #[arg(long)]
    pub maximized: bool,

    /// Open the window in fullscreen on startup
    #[arg(long)]
    pub fullscreen: bool,

    /// Communicate with Neovim over stdin/out
    #[arg(long)]
    pub embed: bool,

    /// Connect to existing Neovim instance
    #[arg(long, value_name = "ADDR")]
    pub server: Option<String>,

    /// Call nvim using the given positional arguments
    #[arg(long)]
    pub spawn: bool,

    /// Edit specified file(s)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl LauncherOptions {
    /// Parse the launcher's share of the arguments (program name excluded).
    pub fn parse_launcher_args(args: &[String]) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("nvim-shell").chain(args.iter().map(String::as_str)))
    }

    /// Rendered help text.
    pub fn usage() -> String {
        Self::command().render_help().to_string()
    }

    /// Fill unset options from the config file.
    pub fn with_config(mut self, config: &Config) -> Self {
        if self.nvim.is_none() {
            self.nvim = config.backend.executable.clone();
        }
        self
    }

    /// Backend executable for the Default mode.
    pub fn nvim_program(&self) -> &str {
        self.nvim.as_deref().unwrap_or(DEFAULT_NVIM)
    }

    /// Number of transport-selecting flags that were given.
    pub fn mode_flag_count(&self) -> usize {
        [self.embed, self.server.is_some(), self.spawn]
            .iter()
            .filter(|set| **set)
            .count()
    }

    /// Window preferences for the presentation layer.
    pub fn window(&self) -> WindowOptions {
        WindowOptions {
            geometry: self.geometry.clone(),
            maximized: self.maximized,
            fullscreen: self.fullscreen,
        }
    }
}

/// Flags the launcher does not interpret itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowOptions {
    pub geometry: Option<String>,
    pub maximized: bool,
    pub fullscreen: bool,
}
