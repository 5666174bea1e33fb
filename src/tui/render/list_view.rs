use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Item;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;

/// Width of the `NN x (A) ` gutter before the item text.
const GUTTER: usize = 3 + 2 + 4;

/// Render the visible items. Also records the viewport height on the app
/// and nudges the scroll offset so the selection stays on screen.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.viewport_height = area.height as usize;
    app.ensure_selected_visible();

    if app.visible.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " no matching tasks",
            Style::default().fg(app.theme.dim),
        )));
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height as usize;
    let text_width = (area.width as usize).saturating_sub(GUTTER);
    let mut lines = Vec::with_capacity(height);
    for (row, &doc_index) in app
        .visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
    {
        let item = &app.document.items[doc_index];
        let selected = app.selected == Some(row);
        lines.push(item_line(item, &app.theme, selected, text_width));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// One row: dimmed source line number, done marker, priority cell, then
/// the text with context and project tokens picked out.
fn item_line<'a>(item: &Item, theme: &Theme, selected: bool, text_width: usize) -> Line<'a> {
    let base_fg = if item.done {
        theme.done
    } else {
        theme.priority_color(item.priority)
    };
    let base = Style::default().fg(base_fg);

    let mut spans = vec![
        Span::styled(
            format!("{:02} ", item.source_line),
            Style::default().fg(theme.dim),
        ),
        Span::styled(if item.done { "x " } else { "  " }.to_string(), base),
        Span::styled(
            match item.priority {
                Some(p) => format!("{p} "),
                None => "    ".to_string(),
            },
            base,
        ),
    ];

    let text = truncate_to_width(&item.text, text_width);
    for chunk in split_keeping_spaces(&text) {
        let word = chunk.trim_end_matches(' ');
        let style = if word.len() > 1 && word.starts_with('@') {
            Style::default().fg(theme.context)
        } else if word.len() > 1 && word.starts_with('+') {
            Style::default().fg(theme.project)
        } else {
            base
        };
        spans.push(Span::styled(chunk.to_string(), style));
    }

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

/// Split into words, each keeping its trailing spaces, so the rebuilt
/// line is byte-identical to the input.
fn split_keeping_spaces(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        // advance to the end of the current word
        while i < bytes.len() && bytes[i] != b' ' {
            i += 1;
        }
        // then past its trailing spaces
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        chunks.push(&text[start..i]);
        start = i;
    }
    chunks
}
