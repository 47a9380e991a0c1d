use anyhow::Context;
use nvim_shell::args::LauncherOptions;
use nvim_shell::config::{Config, LaunchEnv};
use nvim_shell::error::LaunchError;
use nvim_shell::launcher::{self, Handoff};
use nvim_shell::logging;
use nvim_shell::runtime::RuntimePathResolver;

/// Exit status after an interrupt (128 + SIGINT).
const INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = LaunchEnv::capture();
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&env, &config.logging);
    if let Err(e) = &loaded {
        tracing::warn!("{}, using defaults", e);
    }

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let plan = match launcher::plan(&raw, &config) {
        Ok(plan) => plan,
        // help, version and malformed flags are rendered by clap itself
        Err(LaunchError::Usage(e)) => e.exit(),
        Err(e) => {
            tracing::warn!("{}", e);
            eprintln!("Warning: {}\n", e);
            eprintln!("{}", LauncherOptions::usage());
            std::process::exit(1);
        }
    };

    let resolver = RuntimePathResolver::from_env(&env);
    let handoff = plan
        .establish(&resolver)
        .await
        .context("Failed to connect to Neovim")?;

    let code = attach(handoff).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Headless stand-in for the GUI: keep the connection open until the peer
/// closes it or the user interrupts.
async fn attach(handoff: Handoff) -> anyhow::Result<i32> {
    let Handoff {
        connection,
        files,
        window,
    } = handoff;
    tracing::info!(
        kind = %connection.kind(),
        pid = ?connection.pid(),
        ?files,
        ?window,
        "Connection handed off"
    );

    tokio::select! {
        closed = connection.closed() => {
            let code = closed.context("Connection to Neovim failed")?;
            tracing::info!("Neovim closed the connection (exit code {:?})", code);
            Ok(code.unwrap_or(0))
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, closing connection");
            Ok(INTERRUPTED)
        }
    }
}
