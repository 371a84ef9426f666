use crate::{
    app_block::AppBlock,
    columns::{Column, ColumnSet, DEFAULT_COLUMN_WIDTH, detect_columns},
    detail::DetailRenderer,
    entry::{EntryStore, LogLine},
    filter::{FilterEngine, FilterOutcome},
    highlight::{DEFAULT_THEME, Highlighter, SyntectHighlighter},
    loader::Loaded,
    mode::Mode,
    status_bar::DisplayEvent,
    theme::Palette,
    viewport::Viewport,
};
use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend, text::Line, widgets::Padding};
use std::{io, panic, sync::Arc, time::Duration};

mod events;
mod render;

// constants
const DEFAULT_EVENT_POLL_INTERVAL_MS: u64 = 100;
const DEFAULT_LIST_PERCENTAGE: u16 = 60;
const HELP_POPUP_WIDTH: u16 = 60;
const DISPLAY_EVENT_DURATION_MS: u64 = 800;
/// terminal rows not available for table rows: footer, panel border, column header
pub(crate) const RESERVED_ROWS: usize = 3;

/// session configuration, built once at startup
#[derive(Clone)]
pub struct AppDesc {
    pub event_poll_interval: Duration,
    pub column_width: usize,
    pub highlight_theme: String,
    /// share of the width given to the table, the rest goes to the detail pane
    pub list_percentage: u16,
    pub initial_filter: Option<String>,
    pub highlighter: Arc<dyn Highlighter>,
    pub palette: Palette,
}

impl AppDesc {
    pub fn new() -> Self {
        Self {
            event_poll_interval: Duration::from_millis(DEFAULT_EVENT_POLL_INTERVAL_MS),
            column_width: DEFAULT_COLUMN_WIDTH,
            highlight_theme: DEFAULT_THEME.to_string(),
            list_percentage: DEFAULT_LIST_PERCENTAGE,
            initial_filter: None,
            highlighter: Arc::new(SyntectHighlighter::new()),
            palette: Palette::default(),
        }
    }
}

impl Default for AppDesc {
    fn default() -> Self {
        Self::new()
    }
}

/// Install color-eyre's panic report with `restore` chained in front of it.
///
/// Call once, before the terminal is put into raw mode.
pub fn install_panic_hooks<F>(restore: F) -> Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    color_eyre::install().or(Err(anyhow!("Error installing color_eyre")))?;

    let report_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore();
        report_hook(panic_info);
    }));
    Ok(())
}

/// Start an interactive session over already loaded lines
pub fn start_with_desc(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    loaded: Loaded,
    desc: AppDesc,
) -> Result<()> {
    let mut app = App::new(loaded, &desc);
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    app.run(terminal, &desc)
}

/// what the renderer needs to paint one frame
pub struct FrameView<'a> {
    pub columns: Vec<&'a Column>,
    /// lines in `[offset, offset + visible_rows)` of the filtered view
    pub rows: Vec<&'a LogLine>,
    /// index of the cursor within `rows`
    pub cursor_row: Option<usize>,
    pub detail: &'a [Line<'static>],
    pub mode: Mode,
    pub pattern: &'a str,
    pub filtered_count: usize,
    pub total_count: usize,
    pub reversed: bool,
}

pub struct App {
    is_exiting: bool,
    store: EntryStore,
    columns: ColumnSet,
    filter_engine: FilterEngine,
    filter_input: String, // pattern as typed, may differ from the applied one when invalid
    viewport: Viewport,
    mode: Mode,
    detail_renderer: DetailRenderer,
    detail_lines: Vec<Line<'static>>,
    show_help_popup: bool,
    display_event: Option<DisplayEvent>,
    logs_block: AppBlock,
    details_block: AppBlock,
    palette: Palette,
    list_percentage: u16,
}

// ============================================================================
// Initialization
// ============================================================================
impl App {
    pub fn new(loaded: Loaded, desc: &AppDesc) -> Self {
        let store = EntryStore::new(loaded.lines);
        let columns = ColumnSet::new(detect_columns(&loaded.sample, desc.column_width));
        let filter_engine = FilterEngine::new(&store);

        let logs_block = AppBlock::new().set_title("Logs");
        let details_block = AppBlock::new()
            .set_title("Details")
            .set_padding(Padding::horizontal(1));

        let mut app = Self {
            is_exiting: false,
            store,
            columns,
            filter_engine,
            filter_input: String::new(),
            viewport: Viewport::new(RESERVED_ROWS),
            mode: Mode::Normal,
            detail_renderer: DetailRenderer::new(
                desc.highlighter.clone(),
                desc.highlight_theme.clone(),
            ),
            detail_lines: Vec::new(),
            show_help_popup: false,
            display_event: None,
            logs_block,
            details_block,
            palette: desc.palette,
            list_percentage: desc.list_percentage.clamp(10, 90),
        };

        if let Some(pattern) = desc.initial_filter.as_deref().filter(|p| !p.is_empty()) {
            app.filter_input = pattern.to_string();
            app.apply_filter();
        }
        app.update_detail();
        app
    }
}

// ============================================================================
// Lifecycle
// ============================================================================
impl App {
    fn run(
        mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        desc: &AppDesc,
    ) -> Result<()> {
        while !self.is_exiting {
            terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
            self.poll_event(desc.event_poll_interval)?;
            self.check_and_clear_expired_event();
        }
        log::debug!("Session ended");
        Ok(())
    }

    fn poll_event(&mut self, poll_interval: Duration) -> Result<()> {
        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(width, height) => {
                    log::debug!("Terminal resized to {}x{}", width, height);
                    self.resize(width, height);
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }
}

// ============================================================================
// View state
// ============================================================================
impl App {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.viewport.cursor()
    }

    pub fn offset(&self) -> usize {
        self.viewport.offset()
    }

    pub fn visible_rows(&self) -> usize {
        self.viewport.visible_rows()
    }

    pub fn filtered(&self) -> &[usize] {
        self.filter_engine.filtered()
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn detail_lines(&self) -> &[Line<'static>] {
        &self.detail_lines
    }

    /// line currently under the cursor, if the filtered view is non-empty
    pub fn selected_line(&self) -> Option<&LogLine> {
        self.filter_engine
            .get(self.viewport.cursor())
            .and_then(|idx| self.store.get(idx))
    }

    pub fn frame(&self) -> FrameView<'_> {
        let filtered = self.filter_engine.filtered();
        let window = self.viewport.window(filtered.len());
        let cursor_row = (!filtered.is_empty()).then(|| self.viewport.cursor() - window.start);
        let rows = filtered[window]
            .iter()
            .filter_map(|&idx| self.store.get(idx))
            .collect();

        FrameView {
            columns: self.columns.visible().collect(),
            rows,
            cursor_row,
            detail: &self.detail_lines,
            mode: self.mode,
            pattern: &self.filter_input,
            filtered_count: filtered.len(),
            total_count: self.store.len(),
            reversed: self.filter_engine.is_reversed(),
        }
    }

    pub fn detail_scroll(&self) -> usize {
        self.details_block.get_scroll_position()
    }

    /// apply a new terminal size; keeps the cursor on screen and re-renders the detail pane
    ///
    /// the detail scroll survives as long as the same record stays selected
    pub fn resize(&mut self, _width: u16, height: u16) {
        let selected = self.filter_engine.get(self.viewport.cursor());
        let scroll = self.details_block.get_scroll_position();

        self.viewport
            .resize(height as usize, self.filter_engine.len());
        self.update_detail();

        if selected.is_some() && selected == self.filter_engine.get(self.viewport.cursor()) {
            let last = self.detail_lines.len().saturating_sub(1);
            self.details_block.set_scroll_position(scroll.min(last));
        }
    }
}

// ============================================================================
// Filter and detail management
// ============================================================================
impl App {
    /// re-run the filter with the typed pattern; an invalid pattern changes nothing
    fn apply_filter(&mut self) {
        match self.filter_engine.apply(&self.store, &self.filter_input) {
            FilterOutcome::Applied => {
                self.viewport.reset();
                self.update_detail();
            }
            FilterOutcome::Rejected => {}
        }
    }

    fn reverse_view(&mut self) {
        self.filter_engine.reverse();
        self.viewport.reset();
        self.update_detail();
        log::debug!("Filtered view reversed: {}", self.filter_engine.is_reversed());
    }

    fn update_detail(&mut self) {
        self.detail_lines = match self.selected_line() {
            Some(line) => self.detail_renderer.render(line.raw()),
            None => Vec::new(),
        };
        self.details_block.set_scroll_position(0);
        self.details_block.set_lines_count(self.detail_lines.len());
    }
}

// ============================================================================
// Display events
// ============================================================================
impl App {
    /// Set a display event to show in the footer for a given duration
    fn set_display_event(&mut self, text: String, duration: Duration) {
        self.display_event = Some(DisplayEvent::new(
            text,
            duration,
            self.palette.display_event,
        ));
    }

    /// Check if the current display event has expired and clear it if so
    fn check_and_clear_expired_event(&mut self) {
        self.display_event = DisplayEvent::check_and_clear(self.display_event.take());
    }
}
