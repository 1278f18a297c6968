//! ghrepos - GitHub Repository Dashboard
//!
//! A terminal dashboard over the repositories of one GitHub account. Steps
//! through them one at a time, sorted by name, and opens, archives,
//! unarchives, publishes, hides or deletes the one on screen.
//!
//! # Usage
//!
//! ```bash
//! # Browse your repositories
//! ghrepos --ghapikey ghp_xxx --owner octocat
//!
//! # Credentials from the environment, debug log in $TMPDIR/ghrepos.log
//! GHREPOS_API_KEY=ghp_xxx GHREPOS_OWNER=octocat ghrepos --debug
//! ```
//!
//! Stepping past either end of the list ends the session.

mod app;
mod event;
mod menu;
mod session;
mod ui;

use anyhow::Context;
use clap::Parser;
use ghrepos_gateway::Gateway;
use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tracing_subscriber::EnvFilter;

const MISSING_API_KEY: &str = "Provide Github API Key as argument";
const DEBUG_LOG_FILE: &str = "ghrepos.log";

/// Terminal dashboard for your own GitHub repositories.
#[derive(Parser, Debug)]
#[command(name = "ghrepos")]
#[command(about = "Browse, archive, publish and delete your GitHub repositories")]
struct Args {
    /// GitHub API key.
    #[arg(long = "ghapikey", env = "GHREPOS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Owner of the GitHub account.
    #[arg(short, long, env = "GHREPOS_OWNER")]
    owner: String,

    /// Log at debug level to ghrepos.log in the system temp directory.
    #[arg(short, long, env = "GHREPOS_DEBUG")]
    debug: bool,
}

/// The dashboard owns the terminal, so debug output goes to a file.
fn debug_log_path() -> PathBuf {
    std::env::temp_dir().join(DEBUG_LOG_FILE)
}

/// Debug logs go to [`debug_log_path`]; otherwise only errors reach stderr
/// unless `RUST_LOG` says otherwise.
fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_ansi(false);

    if debug {
        let path = debug_log_path();
        let file = File::create(&path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(Mutex::new(file))
            .init();
    } else {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
        builder
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let Some(api_key) = args.api_key.filter(|key| !key.is_empty()) else {
        anyhow::bail!(MISSING_API_KEY);
    };

    init_tracing(args.debug)?;

    let gateway = Gateway::new(api_key, args.owner).context("failed to build GitHub client")?;
    tracing::debug!(owner = gateway.owner(), "starting session");

    let theme = ui::Theme::default();
    let farewell = app::run(Arc::new(gateway), &theme).await?;
    print!("{}", ui::farewell_text(farewell));
    if args.debug {
        eprintln!("Debug log written to {}", debug_log_path().display());
    }

    Ok(())
}
