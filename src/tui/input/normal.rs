use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Priority;
use crate::tui::app::{App, Mode};

pub(super) fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Home => app.select_home(),
        KeyCode::End => app.select_end(),

        KeyCode::Char('/') => {
            // Existing filter text stays in the prompt for editing
            app.mode = Mode::FilterEntry;
        }

        KeyCode::Char('q') | KeyCode::Esc => app.clear_filter_or_quit(),

        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('e') => app.request_edit_selected(),
        KeyCode::Char('n') => app.open_selected_url(),
        KeyCode::Char('d') => app.set_done_selected(),

        KeyCode::Char('-') => app.step_priority_selected(false),
        KeyCode::Char('=') => app.step_priority_selected(true),
        KeyCode::Char('0') => app.set_priority_selected(None),

        KeyCode::Char(' ') | KeyCode::Enter => {
            if app.selected.is_some() {
                app.dialog_action = 0;
                app.mode = Mode::Dialog;
            }
        }

        KeyCode::Char(c) if c.is_ascii_uppercase() => match Priority::new(c) {
            Ok(priority) => app.set_priority_selected(Some(priority)),
            Err(e) => app.notice = Some(e.to_string()),
        },

        _ => {}
    }
}
