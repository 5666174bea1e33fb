use ratatui::style::Color;

use crate::model::Priority;

/// Color theme for the session. `colored` is the default palette;
/// `simple` maps everything to the terminal's own colors for plain
/// output (the `--simple` flag).
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub done: Color,
    pub context: Color,
    pub project: Color,
    pub notice: Color,
    pub prompt: Color,
    /// Row colors by priority rank; the last entry doubles as the
    /// color for low and unset priorities.
    priority: [Color; 5],
}

impl Theme {
    pub fn colored() -> Self {
        Theme {
            text: Color::Rgb(0xCC, 0xCC, 0xCC),
            dim: Color::Rgb(0x7D, 0x7D, 0x7D),
            done: Color::Rgb(0x7D, 0x7D, 0x7D),
            context: Color::Rgb(0x78, 0xC1, 0xF3),
            project: Color::Rgb(0xA4, 0xF5, 0x4C),
            notice: Color::Rgb(0xFF, 0x44, 0x44),
            prompt: Color::Rgb(0xFF, 0xFF, 0xFF),
            priority: [
                Color::Rgb(0xF5, 0xD7, 0x61),
                Color::Rgb(0xA4, 0xF5, 0x4C),
                Color::Rgb(0x78, 0xC1, 0xF3),
                Color::Rgb(0x83, 0x7C, 0xC5),
                Color::Rgb(0xCC, 0xCC, 0xCC),
            ],
        }
    }

    pub fn simple() -> Self {
        Theme {
            text: Color::Reset,
            dim: Color::Reset,
            done: Color::Reset,
            context: Color::Reset,
            project: Color::Reset,
            notice: Color::Reset,
            prompt: Color::Reset,
            priority: [Color::Reset; 5],
        }
    }

    /// Row color for a priority: rank clamped into the palette,
    /// unprioritized items share the palette's last color.
    pub fn priority_color(&self, priority: Option<Priority>) -> Color {
        let last = self.priority.len() - 1;
        let index = priority.map_or(last, |p| p.rank().min(last));
        self.priority[index]
    }
}
