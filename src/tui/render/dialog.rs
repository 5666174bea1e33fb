use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::parse::serialize_item;
use crate::tui::app::{App, DIALOG_ACTIONS};
use crate::util::unicode::truncate_to_width;

/// Centered popup for the selected item: the rendered line on top, the
/// reserved action list below it.
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.selected_item() else {
        return;
    };

    let popup = centered_rect(area, 60, (DIALOG_ACTIONS.len() + 4) as u16);
    let inner_width = popup.width.saturating_sub(4) as usize;

    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&serialize_item(item), inner_width),
        Style::default().fg(app.theme.text),
    ))];
    lines.push(Line::raw(""));
    for (index, action) in DIALOG_ACTIONS.iter().enumerate() {
        let style = if index == app.dialog_action {
            Style::default()
                .fg(app.theme.prompt)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(app.theme.dim)
        };
        lines.push(Line::from(Span::styled(format!(" {action} "), style)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// A rect of `percent_x` width and fixed height, centered in `area`.
fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
