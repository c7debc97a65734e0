//! Terminal user interface for MegaChat
//!
//! A sidebar-navigated shell with panels for chat/solving, essay and test
//! generation, task history, model settings, and the profile. All state
//! mutations happen on the UI loop; the two HTTP exchanges run as spawned
//! tasks and deliver their results back over a channel.

pub mod app;
mod controller;
mod events;
mod theme;
pub mod widgets;

pub use app::{AppState, Panel};
pub use controller::{AppEvent, Controller};
pub use events::{Event, EventHandler};
pub use theme::Theme;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::SessionStore;

/// Run the full-screen TUI until the user quits
pub async fn run(config: Config) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config.endpoints));
    let store = SessionStore::open_default()?;

    // Startup session check: a persisted user is adopted without
    // re-validating the token; absence forces the auth modal open.
    let session = store.load();
    let state = AppState::new(&config.model, session);

    let mut terminal = setup_terminal()?;
    let mut controller = Controller::new(state, client, store);
    let result = controller.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
