mod dialog;
mod filter_entry;
mod normal;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::{App, Mode};

/// Handle a key event in the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any keypress clears a transient notice
    app.notice = None;

    let key = normalize_key(key);
    match app.mode {
        Mode::Normal => normal::handle_normal(app, key),
        Mode::FilterEntry => filter_entry::handle_filter_entry(app, key),
        Mode::Dialog => dialog::handle_dialog(app, key),
    }
}

/// Handle a mouse event. Only meaningful in Normal mode with `--mouse`.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !app.mouse_enabled || app.mode != Mode::Normal {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(_) => {
            let row = mouse.row as usize;
            if row < app.viewport_height {
                let target = app.scroll_offset + row;
                if target < app.visible.len() {
                    app.selected = Some(target);
                }
            }
        }
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol,
/// which sends `Char(lowercase) + SHIFT` instead of `Char(UPPERCASE)`.
/// Priority keys depend on seeing the uppercase letter.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
