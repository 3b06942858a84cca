use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::keys::{handle_key, Action};
use crate::{
    state::plot::{Curves, PlotState},
    ui::draw::draw,
};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

/// Puts the terminal in raw mode on an alternate screen, restoring it when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Shows the training curves of every task until the user quits.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn show(curves: Vec<Curves>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    event_loop(&mut terminal, PlotState::new(curves))
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut state: PlotState,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &state))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        if key.kind == KeyEventKind::Press {
            if let Action::Quit = handle_key(&mut state, key.code) {
                return Ok(());
            }
        }
    }
}
