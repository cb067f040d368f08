// bankdesk: terminal client for a REST customer record service

use std::io;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use bankdesk::backend::HttpBackend;
use bankdesk::config::Config;
use bankdesk::logging;
use bankdesk::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init(&config.log_file)?;
    info!(base_url = %config.base_url, "starting");

    // Backend calls run on worker threads; the UI loop stays on this one
    let runtime = tokio::runtime::Runtime::new()?;
    let backend = HttpBackend::new(config.base_url.clone())?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_ui = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_ui)?;

    // Create and run app
    let mut app = App::new(Arc::new(backend), runtime.handle().clone());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }

    info!("exiting");
    Ok(())
}
