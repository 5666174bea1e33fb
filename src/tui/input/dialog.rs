use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, DIALOG_ACTIONS, Mode};

/// The item dialog. The action list is reserved: moving the highlight
/// works, the actions themselves do nothing yet.
pub(super) fn handle_dialog(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.dialog_action + 1 < DIALOG_ACTIONS.len() {
                app.dialog_action += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.dialog_action = app.dialog_action.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}
