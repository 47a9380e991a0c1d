//! nvim-shell — a front-end launcher for a Neovim backend.
//!
//! The launcher reaches Neovim in exactly one way: over its own stdio
//! (`--embed`), through a socket (`--server`), or by spawning a process
//! (`--spawn`, or `--nvim` by default).

pub mod args;
pub mod config;
pub mod connection;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod runtime;
