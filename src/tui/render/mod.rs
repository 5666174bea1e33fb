pub mod dialog;
pub mod list_view;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use super::app::{App, Mode};

/// Main render function — list, status row, and the dialog overlay.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // item list
            Constraint::Length(1), // status row
        ])
        .split(area);

    list_view::render_list(frame, app, chunks[0]);
    status_row::render_status_row(frame, app, chunks[1]);

    if app.mode == Mode::Dialog {
        dialog::render_dialog(frame, app, area);
    }
}
