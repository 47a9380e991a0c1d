//! Argument partitioner — raw args → launcher / spawn / neovim groups.

/// Marker that separates launcher flags from arguments forwarded to Neovim.
pub const POSITIONAL_MARKER: &str = "--";

/// Marker after which every token belongs to an explicitly spawned process.
pub const SPAWN_MARKER: &str = "--spawn";

/// Directive always passed to Neovim so it reports true-color support.
pub const TRUE_COLOR_DIRECTIVE: [&str; 2] = ["--cmd", "set termguicolors"];

/// The three disjoint argument groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionResult {
    /// Tokens handed to the launcher's flag parser.
    pub launcher_args: Vec<String>,
    /// Tokens after `--spawn`; the first one names the executable.
    pub spawn_args: Vec<String>,
    /// Startup arguments for Neovim, always led by the true-color directive.
    pub neovim_args: Vec<String>,
    /// Index of the first `--` in the raw arguments.
    pub positional_marker: Option<usize>,
    /// Index of the first `--spawn` in the raw arguments.
    pub spawn_marker: Option<usize>,
}

impl PartitionResult {
    /// Arguments that came after a `--` marker (excludes the directive).
    pub fn forwarded_args(&self) -> &[String] {
        &self.neovim_args[TRUE_COLOR_DIRECTIVE.len()..]
    }

    /// Whether the spawn branch claimed the trailing tokens.
    pub fn spawn_claimed(&self) -> bool {
        match (self.spawn_marker, self.positional_marker) {
            (Some(spawn), Some(marker)) => spawn < marker,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Split raw arguments (program name excluded) into their groups.
///
/// `--spawn` wins over `--` when it comes first and then claims every
/// remaining token, including any later `--`.
pub fn partition(raw: &[String]) -> PartitionResult {
    let positional_marker = raw.iter().position(|a| a == POSITIONAL_MARKER);
    let spawn_marker = raw.iter().position(|a| a == SPAWN_MARKER);

    let mut result = PartitionResult {
        launcher_args: Vec::new(),
        spawn_args: Vec::new(),
        neovim_args: TRUE_COLOR_DIRECTIVE.iter().map(|s| s.to_string()).collect(),
        positional_marker,
        spawn_marker,
    };

    match (spawn_marker, positional_marker) {
        (Some(spawn), marker) if marker.map_or(true, |m| spawn < m) => {
            result.launcher_args = raw[..=spawn].to_vec();
            result.spawn_args = raw[spawn + 1..].to_vec();
        }
        (_, Some(marker)) => {
            result.launcher_args = raw[..marker].to_vec();
            result.neovim_args.extend_from_slice(&raw[marker + 1..]);
        }
        _ => {
            result.launcher_args = raw.to_vec();
        }
    }

    tracing::debug!(
        launcher = ?result.launcher_args,
        spawn = ?result.spawn_args,
        neovim = ?result.neovim_args,
        "Partitioned arguments"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn directive() -> Vec<String> {
        raw(&TRUE_COLOR_DIRECTIVE)
    }

    #[test]
    fn no_markers_keeps_everything_for_launcher() {
        let args = raw(&["--nvim", "/usr/bin/nvim", "notes.txt"]);
        let result = partition(&args);

        assert_eq!(result.launcher_args, args);
        assert!(result.spawn_args.is_empty());
        assert_eq!(result.neovim_args, directive());
        assert!(result.forwarded_args().is_empty());
        assert!(!result.spawn_claimed());
    }

    #[test]
    fn empty_input() {
        let result = partition(&[]);
        assert!(result.launcher_args.is_empty());
        assert!(result.spawn_args.is_empty());
        assert_eq!(result.neovim_args, directive());
        assert_eq!(result.positional_marker, None);
        assert_eq!(result.spawn_marker, None);
    }

    #[test]
    fn spawn_claims_trailing_tokens() {
        let result = partition(&raw(&["--spawn", "myexe", "-x"]));

        assert_eq!(result.launcher_args, raw(&["--spawn"]));
        assert_eq!(result.spawn_args, raw(&["myexe", "-x"]));
        assert_eq!(result.neovim_args, directive());
        assert!(result.spawn_claimed());
    }

    #[test]
    fn marker_after_spawn_is_forwarded_verbatim() {
        let result = partition(&raw(&["--maximized", "--spawn", "nvim", "--", "-u", "NONE"]));

        assert_eq!(result.launcher_args, raw(&["--maximized", "--spawn"]));
        assert_eq!(result.spawn_args, raw(&["nvim", "--", "-u", "NONE"]));
        assert_eq!(result.neovim_args, directive());
        assert_eq!(result.positional_marker, Some(3));
    }

    #[test]
    fn marker_before_spawn_forwards_spawn_to_neovim() {
        let result = partition(&raw(&["file.txt", "--", "--spawn", "x"]));

        assert_eq!(result.launcher_args, raw(&["file.txt"]));
        assert!(result.spawn_args.is_empty());
        assert_eq!(result.forwarded_args(), raw(&["--spawn", "x"]).as_slice());
        assert!(!result.spawn_claimed());
    }

    #[test]
    fn marker_splits_launcher_and_neovim_args() {
        let result = partition(&raw(&["--nvim", "nvim-nightly", "a.rs", "--", "-u", "NONE"]));

        assert_eq!(result.launcher_args, raw(&["--nvim", "nvim-nightly", "a.rs"]));
        assert!(result.spawn_args.is_empty());
        assert_eq!(
            result.neovim_args,
            raw(&["--cmd", "set termguicolors", "-u", "NONE"])
        );
    }

    #[test]
    fn only_first_marker_splits() {
        let result = partition(&raw(&["--", "-c", "--", "x"]));

        assert!(result.launcher_args.is_empty());
        assert_eq!(result.forwarded_args(), raw(&["-c", "--", "x"]).as_slice());
    }

    #[test]
    fn trailing_spawn_leaves_spawn_args_empty() {
        let result = partition(&raw(&["--spawn"]));
        assert_eq!(result.launcher_args, raw(&["--spawn"]));
        assert!(result.spawn_args.is_empty());
        assert!(result.spawn_claimed());
    }

    #[test]
    fn partition_is_deterministic() {
        let args = raw(&["--server", "127.0.0.1:6666", "--", "-n"]);
        assert_eq!(partition(&args), partition(&args));
    }
}
