use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen).
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let line = match app.mode {
        Mode::FilterEntry => {
            // Filter prompt: /pattern▌
            let mut spans = vec![
                Span::styled(
                    format!("/{}", app.filter_text),
                    Style::default().fg(app.theme.prompt),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.prompt)), // ▌ cursor
            ];
            pad_with_hint(&mut spans, "Enter commit  Esc clear", width, app);
            Line::from(spans)
        }
        Mode::Normal | Mode::Dialog => {
            if let Some(ref notice) = app.notice {
                Line::from(Span::styled(
                    notice.clone(),
                    Style::default().fg(app.theme.notice),
                ))
            } else {
                let mut spans = Vec::new();
                if !app.filter_text.is_empty() {
                    spans.push(Span::styled(
                        format!("/{}", app.filter_text),
                        Style::default().fg(app.theme.dim),
                    ));
                }
                let counts = format!("{}/{}", app.visible.len(), app.document.len());
                pad_with_hint(&mut spans, &counts, width, app);
                Line::from(spans)
            }
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Right-align `hint` after the existing spans, dimmed, if it fits.
fn pad_with_hint(spans: &mut Vec<Span<'static>>, hint: &str, width: usize, app: &App) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            hint.to_string(),
            Style::default().fg(app.theme.dim),
        ));
    }
}
