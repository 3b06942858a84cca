use crossterm::event::KeyCode;

use crate::state::plot::PlotState;

pub enum Action {
    None,
    Quit,
}

pub fn handle_key(state: &mut PlotState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Right | KeyCode::Char('l') => {
            state.next();
            Action::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.prev();
            Action::None
        }
        _ => Action::None,
    }
}
