//! Runtime path discovery.
//!
//! The launcher may ship its own Neovim runtime files. Candidates are tried in
//! a fixed order and the first existing directory is appended to Neovim's
//! `runtimepath` at startup.

use std::path::{Path, PathBuf};

use crate::config::LaunchEnv;

/// Runtime directory configured at build time, if any.
pub const COMPILED_RUNTIME_PATH: Option<&str> = option_env!("NVIM_SHELL_RUNTIME_PATH");

/// Where a candidate directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimePathSource {
    EnvironmentOverride,
    CompileTimeDefault,
    RelativeToExecutable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePathCandidate {
    pub source: RuntimePathSource,
    pub path: PathBuf,
}

impl RuntimePathCandidate {
    /// `--cmd` tokens that append this directory to Neovim's runtimepath.
    pub fn directive(&self) -> [String; 2] {
        ["--cmd".to_string(), format!("set rtp+={}", self.path.display())]
    }
}

/// Ordered fallback chain over the runtime path candidates.
#[derive(Debug, Clone, Default)]
pub struct RuntimePathResolver {
    env_override: Option<PathBuf>,
    compiled_default: Option<PathBuf>,
    executable: Option<PathBuf>,
}

impl RuntimePathResolver {
    pub fn new(
        env_override: Option<PathBuf>,
        compiled_default: Option<PathBuf>,
        executable: Option<PathBuf>,
    ) -> Self {
        Self {
            env_override,
            compiled_default,
            executable,
        }
    }

    /// Resolver for this process: captured environment plus build-time default.
    pub fn from_env(env: &LaunchEnv) -> Self {
        Self::new(
            env.runtime_override.clone(),
            COMPILED_RUNTIME_PATH.map(PathBuf::from),
            env.current_exe.clone(),
        )
    }

    /// All candidates in priority order, existing or not.
    pub fn candidates(&self) -> Vec<RuntimePathCandidate> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(path) = &self.env_override {
            candidates.push(RuntimePathCandidate {
                source: RuntimePathSource::EnvironmentOverride,
                path: path.clone(),
            });
        }
        if let Some(path) = &self.compiled_default {
            candidates.push(RuntimePathCandidate {
                source: RuntimePathSource::CompileTimeDefault,
                path: path.clone(),
            });
        }
        if let Some(path) = self.executable.as_deref().and_then(relative_to_executable) {
            candidates.push(RuntimePathCandidate {
                source: RuntimePathSource::RelativeToExecutable,
                path,
            });
        }
        candidates
    }

    /// First candidate that exists as a directory.
    pub fn resolve(&self) -> Option<RuntimePathCandidate> {
        let found = self.candidates().into_iter().find(|candidate| {
            let exists = candidate.path.is_dir();
            tracing::debug!(
                source = ?candidate.source,
                path = %candidate.path.display(),
                exists,
                "Checked runtime path candidate"
            );
            exists
        });

        match &found {
            Some(candidate) => tracing::info!(
                source = ?candidate.source,
                "Using runtime path {}",
                candidate.path.display()
            ),
            None => tracing::debug!("No runtime path found, Neovim uses its defaults"),
        }
        found
    }
}

/// `<exe dir>/../Resources/runtime` inside a macOS bundle.
#[cfg(target_os = "macos")]
fn bundled_runtime(prefix: &Path) -> PathBuf {
    prefix.join("Resources").join("runtime")
}

/// `<exe dir>/../share/nvim-shell/runtime` for an installed prefix.
#[cfg(not(target_os = "macos"))]
fn bundled_runtime(prefix: &Path) -> PathBuf {
    prefix.join("share").join("nvim-shell").join("runtime")
}

fn relative_to_executable(executable: &Path) -> Option<PathBuf> {
    let prefix = executable.parent()?.parent()?;
    Some(bundled_runtime(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lay out `<root>/bin/nvim-shell` and return the fake executable path.
    fn install_prefix(root: &Path) -> PathBuf {
        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        bin.join("nvim-shell")
    }

    #[test]
    fn relative_path_walks_up_from_executable_dir() {
        let path = relative_to_executable(Path::new("/opt/app/bin/nvim-shell")).unwrap();
        assert_eq!(path, bundled_runtime(Path::new("/opt/app")));
    }

    #[test]
    fn executable_at_root_has_no_relative_candidate() {
        assert_eq!(relative_to_executable(Path::new("nvim-shell")), None);
    }

    #[test]
    fn candidates_keep_priority_order() {
        let resolver = RuntimePathResolver::new(
            Some("/env".into()),
            Some("/compiled".into()),
            Some("/usr/local/bin/nvim-shell".into()),
        );
        let sources: Vec<_> = resolver.candidates().iter().map(|c| c.source).collect();
        assert_eq!(
            sources,
            vec![
                RuntimePathSource::EnvironmentOverride,
                RuntimePathSource::CompileTimeDefault,
                RuntimePathSource::RelativeToExecutable,
            ]
        );
    }

    #[test]
    fn falls_through_to_executable_relative_dir() {
        let root = TempDir::new().unwrap();
        let exe = install_prefix(root.path());
        let runtime = bundled_runtime(root.path());
        std::fs::create_dir_all(&runtime).unwrap();

        let resolver = RuntimePathResolver::new(
            Some(root.path().join("missing-env")),
            Some(root.path().join("missing-compiled")),
            Some(exe),
        );
        let found = resolver.resolve().unwrap();
        assert_eq!(found.source, RuntimePathSource::RelativeToExecutable);
        assert_eq!(found.path, runtime);
    }

    #[test]
    fn regular_file_is_not_a_runtime_dir() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("runtime");
        std::fs::write(&file, "not a directory").unwrap();

        let resolver = RuntimePathResolver::new(Some(file), None, None);
        assert_eq!(resolver.resolve(), None);
    }

    #[test]
    fn directive_appends_to_runtimepath() {
        let candidate = RuntimePathCandidate {
            source: RuntimePathSource::EnvironmentOverride,
            path: PathBuf::from("/usr/share/nvim-shell/runtime"),
        };
        assert_eq!(
            candidate.directive(),
            [
                "--cmd".to_string(),
                "set rtp+=/usr/share/nvim-shell/runtime".to_string()
            ]
        );
    }
}
