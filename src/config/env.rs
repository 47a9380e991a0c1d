use std::ffi::OsString;
use std::path::PathBuf;

/// Variable naming a file that receives all diagnostics.
pub const LOG_FILE_ENV: &str = "NVIM_SHELL_LOG";

/// Variable naming a runtime directory that overrides every other candidate.
pub const RUNTIME_PATH_ENV: &str = "NVIM_SHELL_RUNTIME_PATH";

/// Process environment captured once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnv {
    /// Log file path, when set and non-empty.
    pub log_file: Option<PathBuf>,
    /// Runtime path override, when set and non-empty.
    pub runtime_override: Option<PathBuf>,
    /// Location of the running launcher binary.
    pub current_exe: Option<PathBuf>,
}

impl LaunchEnv {
    pub fn capture() -> Self {
        Self {
            log_file: non_empty(std::env::var_os(LOG_FILE_ENV)),
            runtime_override: non_empty(std::env::var_os(RUNTIME_PATH_ENV)),
            current_exe: std::env::current_exe().ok(),
        }
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}
