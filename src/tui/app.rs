use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::clock::{Clock, SystemClock};
use crate::io::document::Document;
use crate::io::watcher::FileWatcher;
use crate::model::{Item, Priority, PriorityStep};
use crate::ops::filter::{Filter, visible_indices};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    FilterEntry,
    Dialog,
}

/// Colored palette or plain terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Colored,
    Simple,
}

/// Actions listed in the item dialog. Reserved: navigating the list has
/// no effect yet.
pub const DIALOG_ACTIONS: &[&str] = &["do", "nav"];

/// Startup configuration, straight from the CLI.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub file: PathBuf,
    pub filter: Option<String>,
    pub simple: bool,
    pub mouse: bool,
    pub watch: bool,
}

/// A request from the input layer that needs the terminal itself
/// (suspend/resume), performed by the event loop after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalRequest {
    /// Open the external editor at the given 1-based file line.
    Edit { line: usize },
}

/// Main application state.
pub struct App {
    pub document: Document,
    pub mode: Mode,
    pub display_mode: DisplayMode,
    pub mouse_enabled: bool,
    pub theme: Theme,
    pub should_quit: bool,
    /// Filter text; edited live in FilterEntry mode.
    pub filter_text: String,
    /// Document indices of the items passing the filter, in display
    /// order: document order, stably sorted by priority rank.
    pub visible: Vec<usize>,
    /// Index into `visible`. `None` iff `visible` is empty.
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    /// Highlighted entry of the dialog's action list.
    pub dialog_action: usize,
    /// Transient status-row notice (write failures, editor failures).
    /// Cleared on the next keypress.
    pub notice: Option<String>,
    /// Set by the input layer when an action needs the terminal.
    pub external: Option<ExternalRequest>,
    /// List rows available on screen; updated by the renderer.
    pub viewport_height: usize,
    pub clock: Box<dyn Clock>,
}

impl App {
    pub fn new(document: Document, options: &SessionOptions) -> Self {
        let theme = if options.simple {
            Theme::simple()
        } else {
            Theme::colored()
        };
        let mut app = App {
            document,
            mode: Mode::Normal,
            display_mode: if options.simple {
                DisplayMode::Simple
            } else {
                DisplayMode::Colored
            },
            mouse_enabled: options.mouse,
            theme,
            should_quit: false,
            filter_text: options.filter.clone().unwrap_or_default(),
            visible: Vec::new(),
            selected: None,
            scroll_offset: 0,
            dialog_action: 0,
            notice: None,
            external: None,
            viewport_height: 0,
            clock: Box::new(SystemClock),
        };
        app.rebuild_visible();
        app.selected = if app.visible.is_empty() { None } else { Some(0) };
        app
    }

    /// Recompute `visible` from the document and the filter. The filter
    /// preserves document order; the display sort moves higher-priority
    /// items up without ever touching the file.
    fn rebuild_visible(&mut self) {
        let filter = Filter::parse(&self.filter_text);
        let mut visible = visible_indices(&self.document.items, &filter);
        visible.sort_by_key(|&i| priority_sort_key(&self.document.items[i]));
        self.visible = visible;
    }

    /// Rebuild the visible set and restore the selection: prefer the item
    /// with the previously selected source line if it is still visible,
    /// fall back to clamping the numeric index, absent when empty.
    pub fn refresh_view(&mut self) {
        let prev_line = self.selected_item().map(|item| item.source_line);
        let prev_index = self.selected;
        self.rebuild_visible();

        self.selected = if self.visible.is_empty() {
            None
        } else if let Some(line) = prev_line
            && let Some(pos) = self
                .visible
                .iter()
                .position(|&i| self.document.items[i].source_line == line)
        {
            Some(pos)
        } else {
            Some(prev_index.unwrap_or(0).min(self.visible.len() - 1))
        };
    }

    pub fn selected_doc_index(&self) -> Option<usize> {
        self.selected.map(|s| self.visible[s])
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_doc_index().map(|i| &self.document.items[i])
    }

    pub fn select_next(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some((selected + 1).min(self.visible.len() - 1));
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(selected.saturating_sub(1));
        }
    }

    pub fn select_home(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(0);
        }
        self.scroll_offset = 0;
    }

    pub fn select_end(&mut self) {
        if !self.visible.is_empty() {
            self.selected = Some(self.visible.len() - 1);
        }
    }

    /// The shared `q`/Esc behavior: an active filter is cleared first;
    /// with no filter the session ends.
    pub fn clear_filter_or_quit(&mut self) {
        if self.filter_text.is_empty() {
            self.should_quit = true;
        } else {
            self.filter_text.clear();
            self.refresh_view();
        }
    }

    /// Reload the document from disk. A failed reload (file deleted out
    /// from under us) keeps the prior state and reports a notice.
    pub fn reload(&mut self) {
        if let Err(e) = self.document.reload() {
            self.notice = Some(e.to_string());
        }
        self.refresh_view();
    }

    pub fn set_priority_selected(&mut self, priority: Option<Priority>) {
        let Some(index) = self.selected_doc_index() else {
            return;
        };
        if let Err(e) = self.document.set_priority(index, priority) {
            self.notice = Some(e.to_string());
        }
        self.refresh_view();
    }

    pub fn step_priority_selected(&mut self, up: bool) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let next = if up {
            item.priority.increment()
        } else {
            item.priority.decrement()
        };
        self.set_priority_selected(next);
    }

    pub fn set_done_selected(&mut self) {
        let Some(index) = self.selected_doc_index() else {
            return;
        };
        if let Err(e) = self.document.set_done(index, true, self.clock.as_ref()) {
            self.notice = Some(e.to_string());
        }
        self.refresh_view();
    }

    /// Open the first URL-shaped token of the selected item's text in the
    /// system browser. No-op when the text carries no URL.
    pub fn open_selected_url(&mut self) {
        let Some(url) = self.selected_item().and_then(|item| first_url(&item.text)) else {
            return;
        };
        if let Err(e) = open::that(&url) {
            self.notice = Some(format!("could not open {url}: {e}"));
        }
    }

    /// Ask the event loop to run the external editor on the selected item.
    pub fn request_edit_selected(&mut self) {
        if let Some(item) = self.selected_item() {
            self.external = Some(ExternalRequest::Edit {
                line: item.source_line,
            });
        }
    }

    /// Keep the selection inside the viewport by moving the scroll offset
    /// as little as possible.
    pub fn ensure_selected_visible(&mut self) {
        let height = self.viewport_height.max(1);
        if let Some(selected) = self.selected {
            if selected < self.scroll_offset {
                self.scroll_offset = selected;
            } else if selected >= self.scroll_offset + height {
                self.scroll_offset = selected + 1 - height;
            }
        }
        if self.scroll_offset >= self.visible.len() {
            self.scroll_offset = self.visible.len().saturating_sub(1);
        }
    }
}

fn priority_sort_key(item: &Item) -> usize {
    item.priority.map_or(26, |p| p.rank())
}

fn first_url(text: &str) -> Option<String> {
    let re = Regex::new(r"https?://\S+").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

fn resolve_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string())
}

/// Run the interactive session. The only fatal errors are the initial
/// document load and terminal setup; everything later is reported in the
/// status row instead.
pub fn run(options: SessionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let document = Document::load(&options.file)?;
    let mut app = App::new(document, &options);

    let watcher = if options.watch {
        Some(FileWatcher::start(&options.file)?)
    } else {
        None
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if app.mouse_enabled {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let mouse_enabled = app.mouse_enabled;
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        if mouse_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture);
        }
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    if app.mouse_enabled {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&FileWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // One reload per drain, however many raw events piled up.
        if let Some(watcher) = watcher
            && watcher.poll_changed()
        {
            app.reload();
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    if let Some(request) = app.external.take() {
                        handle_external(terminal, app, request)?;
                    }
                }
                Event::Mouse(mouse) => {
                    input::handle_mouse(app, mouse);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_external(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    request: ExternalRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    match request {
        ExternalRequest::Edit { line } => {
            suspend_terminal(terminal, app.mouse_enabled)?;
            let editor = resolve_editor();
            let mut parts = editor.split_whitespace();
            let program = parts.next().unwrap_or("vi").to_string();
            let status = Command::new(&program)
                .args(parts)
                .arg(format!("+{line}"))
                .arg(&app.document.path)
                .status();
            resume_terminal(terminal, app.mouse_enabled)?;

            match status {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    app.notice = Some(format!("{program} exited with {status}"));
                }
                Err(e) => {
                    app.notice = Some(format!("could not run {program}: {e}"));
                }
            }
            app.reload();
        }
    }
    Ok(())
}

fn suspend_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mouse_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.show_cursor()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn resume_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mouse_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), EnableMouseCapture)?;
    }
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok(())
}
