mod input;
mod mutations;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use courier_core::config::CoreConfig;
use courier_core::secure_storage::{SecureKey, SecureStorage, SecureStorageError};
use courier_core::tracing_setup;

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser, Debug)]
#[command(name = "courier-tui", about = "Terminal client for the Courier API", version)]
struct Args {
    /// Base URL of the API, e.g. http://localhost:8000/api/v1
    #[arg(long)]
    api_url: Option<String>,

    /// Append structured logs to this file (stdout is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_setup::init_tracing(args.log_file)?;

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before showing panic
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let mut config = CoreConfig::from_env();
    if let Some(api_url) = args.api_url {
        config.api_base_url = api_url;
    }
    tracing::info!(api_base_url = %config.api_base_url, "starting courier-tui");

    let (fetch_tx, mut fetch_rx) = tokio::sync::mpsc::unbounded_channel();
    let (mutation_tx, mut mutation_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut app = App::new(config, fetch_tx, mutation_tx);

    // Auto-login with a previously stored token; otherwise the login
    // view collects one.
    match SecureStorage::get(SecureKey::AccessToken) {
        Ok(token) => app.connect(&token),
        Err(SecureStorageError::KeyNotFound(_)) => {}
        Err(err) => tracing::warn!(error = %err, "could not read stored access token"),
    }

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &mut fetch_rx, &mut mutation_rx).await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    Ok(())
}
