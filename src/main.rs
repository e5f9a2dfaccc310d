mod app;
mod clock;
mod command_widget;
mod commands;
mod config;
mod error;
mod events;
mod store;
mod theme;
mod types;
mod views;
use crate::error::{Error, Result};
use crate::{
    app::App,
    clock::{SessionClock, SystemClock},
    config::{get_log_file, Config},
    events::TerminalEvents,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use env_logger::{Env, Target};
use log::{debug, error, LevelFilter};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io::stdout};

/// Logs go to a file in the XDG state directory since the terminal belongs to the UI.
fn init_logging() {
    let env = Env::default().default_filter_or("info");
    let file = get_log_file().ok().and_then(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    match file {
        Some(file) => env_logger::Builder::from_env(env)
            .target(Target::Pipe(Box::new(file)))
            .init(),
        None => env_logger::Builder::new()
            .filter_level(LevelFilter::Off)
            .init(),
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let config = Config::load()?;
    debug!("Loaded config {config:?}");
    let mut app = App::new(
        &config,
        Box::new(SystemClock),
        SessionClock::every(config.tick_period()),
    )?;

    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(Error::from)
        .and_then(|mut terminal| views::home::run(&mut terminal, &mut TerminalEvents, &mut app));

    restore_terminal()?;
    if let Err(e) = &result {
        error!("Exiting on error: {e}");
    }
    result
}
