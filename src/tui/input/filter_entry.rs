use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Filter-entry mode: the prompt edits `filter_text` live, recomputing
/// the visible set and re-clamping the selection on every change.
pub(super) fn handle_filter_entry(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Commit and return to Normal; the filter is already applied
        (_, KeyCode::Enter) => {
            app.mode = Mode::Normal;
        }

        // Esc clears a non-empty filter; with nothing to clear it quits
        (_, KeyCode::Esc) => {
            let had_filter = !app.filter_text.is_empty();
            app.clear_filter_or_quit();
            if had_filter {
                app.mode = Mode::Normal;
            }
        }

        (_, KeyCode::Backspace) => {
            if app.filter_text.pop().is_some() {
                app.refresh_view();
            }
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.filter_text.push(c);
            app.refresh_view();
        }

        _ => {}
    }
}
