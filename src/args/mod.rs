//! Argument handling for the launcher.
//!
//! ```text
//! Raw args → Partition → Parse launcher flags → ConnectionMode
//! ```
//!
//! Partitioning is a pure function over the raw vector; flag parsing only
//! ever sees the launcher's share of it.

mod cli;
mod partition;

pub use cli::{LauncherOptions, WindowOptions, DEFAULT_NVIM};
pub use partition::{
    partition, PartitionResult, POSITIONAL_MARKER, SPAWN_MARKER, TRUE_COLOR_DIRECTIVE,
};
