//! SimLife Entry Point
//!
//! Launches the terminal dashboard for a Game of Life universe.
//!
//! The universe is configured from `$XDG_CONFIG_HOME/simlife/universe.toml`
//! and `SIMLIFE_*` environment variables (`SIMLIFE_WIDTH`, `SIMLIFE_HEIGHT`,
//! `SIMLIFE_INTERVAL_MS`, `SIMLIFE_MAX_STEPS`, `SIMLIFE_RULE`,
//! `SIMLIFE_WRAP`, `SIMLIFE_TOPOLOGY`, `SIMLIFE_FILL`). Logging is controlled
//! by `RUST_LOG`.

use std::io;
use std::panic;
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simlife_tui::{Dashboard, DashboardConfig};
use universe_core::{load_config, LifeUniverse, Universe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: simlife requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH was run without -t.");
        std::process::exit(1);
    }

    // Build the universe before touching the terminal so config errors print normally
    let config = load_config()?;
    tracing::info!(source = ?config.source(), "Universe configuration loaded");
    let universe = Arc::new(LifeUniverse::new(config)?);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the dashboard
    let result = run_dashboard(&mut terminal, universe).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_dashboard(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    universe: Arc<LifeUniverse>,
) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(universe.clone(), DashboardConfig::default())?;

    let refresh = dashboard.refresh_handle();
    universe.set_observer(Box::new(move || refresh.refresh()));

    dashboard.start(terminal).await?;

    // Stop the run driver before the runtime shuts down
    universe.stop();
    Ok(())
}
