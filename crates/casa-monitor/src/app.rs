//! Main TUI application.

use crate::components::{
    FilterBar, Footer, Header, ListingDetail, ListingList, ListingMap, LogViewer, LogViewerState,
    ProcessDetail, ProcessList,
};
use crate::ui::{MarkerCache, Theme};
use casa_core::{
    FilterCriteria, Listing, MAX_PRICE_PRESETS, MIN_PRICE_PRESETS, ROOM_PRESETS, coerce_lower,
    coerce_upper,
};
use casa_scrape::{AdminProcess, LogExporter, ProcessMonitor, TickReport};
use casa_state::Dashboard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
};
use std::time::{Duration, Instant};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Filters, map, results and details
    #[default]
    Listings,
    /// Scrape process console
    Admin,
}

/// Active panel for keyboard focus in the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    /// Process list (left panel)
    #[default]
    List,
    /// Log viewer panel (bottom right)
    Logs,
}

/// Filter field edited as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    Query,
    MinPrice,
    MaxPrice,
}

impl FilterInput {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Query => "Search",
            Self::MinPrice => "Min price",
            Self::MaxPrice => "Max price",
        }
    }

    /// Edit buffer contents when editing starts.
    fn initial_text(&self, criteria: &FilterCriteria) -> String {
        match self {
            Self::Query => criteria.query.clone(),
            Self::MinPrice => criteria.min_price.to_string(),
            Self::MaxPrice if criteria.max_price == u64::MAX => String::new(),
            Self::MaxPrice => criteria.max_price.to_string(),
        }
    }

    /// Criteria with this field replaced by the coerced buffer.
    fn apply(&self, criteria: &FilterCriteria, buffer: &str) -> FilterCriteria {
        let mut next = criteria.clone();
        match self {
            Self::Query => next.query = buffer.to_string(),
            Self::MinPrice => next.min_price = coerce_lower(buffer),
            Self::MaxPrice => next.max_price = coerce_upper(buffer),
        }
        next
    }
}

#[derive(Debug, Clone)]
struct FilterEdit {
    field: FilterInput,
    buffer: String,
    original: FilterCriteria,
}

/// Main application state.
pub struct App {
    pub dashboard: Dashboard,
    pub monitor: ProcessMonitor,
    pub should_quit: bool,
    pub view_mode: ViewMode,
    pub active_panel: ActivePanel,
    pub show_help: bool,
    pub theme: Theme,
    pub log_viewer_state: LogViewerState,
    markers: MarkerCache,
    exporter: LogExporter,
    editing: Option<FilterEdit>,
    status_message: Option<(String, Instant)>, // Temporary status message with timestamp
    waiting_for_panel_key: bool, // True when Ctrl-W was pressed, waiting for direction
}

impl App {
    /// Create the app in the loading state.
    pub fn new(listings: Vec<Listing>, processes: Vec<AdminProcess>, exporter: LogExporter) -> Self {
        Self {
            dashboard: Dashboard::new(listings),
            monitor: ProcessMonitor::new(processes),
            should_quit: false,
            view_mode: ViewMode::default(),
            active_panel: ActivePanel::default(),
            show_help: false,
            theme: Theme::default(),
            log_viewer_state: LogViewerState::new(),
            markers: MarkerCache::new(),
            exporter,
            editing: None,
            status_message: None,
            waiting_for_panel_key: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// End the loading presentation and show live data.
    pub fn finish_loading(&mut self) {
        self.dashboard.set_loading(false);
    }

    /// Advance the scrape simulation by one tick.
    pub fn on_tick(&mut self) -> TickReport {
        let report = self.monitor.tick();
        self.note_completions(&report);
        report
    }

    fn note_completions(&mut self, report: &TickReport) {
        if let Some(id) = report.completed.last() {
            self.set_status(format!("{} completed", id));
        }
    }

    /// Swap in a freshly loaded listing collection.
    pub fn reload_listings(&mut self, listings: Vec<Listing>) {
        let count = listings.len();
        self.dashboard.set_listings(listings);
        self.set_status(format!("Reloaded {} listings", count));
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Status message if it is recent enough to show.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().and_then(|(msg, timestamp)| {
            if timestamp.elapsed() < Duration::from_secs(3) {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    /// Field being edited and its buffer.
    pub fn editing(&self) -> Option<(FilterInput, &str)> {
        self.editing
            .as_ref()
            .map(|edit| (edit.field, edit.buffer.as_str()))
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Listings => ViewMode::Admin,
            ViewMode::Admin => ViewMode::Listings,
        };
        self.active_panel = ActivePanel::List;
    }

    fn switch_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::List => ActivePanel::Logs,
            ActivePanel::Logs => ActivePanel::List,
        };
    }

    // Listings

    fn select_first_listing(&mut self) {
        let first = self.dashboard.filtered().next().map(|l| l.id.clone());
        if let Some(id) = first {
            self.dashboard.select_listing(&id);
        }
    }

    fn select_last_listing(&mut self) {
        let last = self.dashboard.filtered().last().map(|l| l.id.clone());
        if let Some(id) = last {
            self.dashboard.select_listing(&id);
        }
    }

    /// Open the details panel on the highlighted listing.
    fn open_details(&mut self) {
        let id = self.dashboard.effective_selected_id().map(String::from);
        if let Some(id) = id {
            self.dashboard.select_listing(&id);
        }
    }

    fn cycle_city(&mut self) {
        let cities = self.dashboard.cities();
        let criteria = self.dashboard.criteria();
        let next = match cities.iter().position(|c| *c == criteria.city) {
            Some(i) => cities[(i + 1) % cities.len()].clone(),
            None => match cities.first() {
                Some(city) => city.clone(),
                None => return,
            },
        };
        let criteria = criteria.clone().with_city(next);
        self.dashboard.set_criteria(criteria);
    }

    fn cycle_min_price(&mut self) {
        let criteria = self.dashboard.criteria();
        let next = next_preset(&MIN_PRICE_PRESETS, &criteria.min_price);
        let criteria = criteria.clone().with_price(next, criteria.max_price);
        self.dashboard.set_criteria(criteria);
    }

    fn cycle_max_price(&mut self) {
        let criteria = self.dashboard.criteria();
        let next = next_preset(&MAX_PRICE_PRESETS, &criteria.max_price);
        let criteria = criteria.clone().with_price(criteria.min_price, next);
        self.dashboard.set_criteria(criteria);
    }

    fn cycle_rooms(&mut self) {
        let criteria = self.dashboard.criteria();
        let (beds, baths) = next_preset(&ROOM_PRESETS, &(criteria.bedrooms, criteria.bathrooms));
        let criteria = criteria.clone().with_rooms(beds, baths);
        self.dashboard.set_criteria(criteria);
    }

    fn reset_filters(&mut self) {
        self.dashboard.reset_criteria();
        self.set_status("Filters reset");
    }

    fn start_edit(&mut self, field: FilterInput) {
        let original = self.dashboard.criteria().clone();
        self.editing = Some(FilterEdit {
            field,
            buffer: field.initial_text(&original),
            original,
        });
    }

    /// Handle a key while a filter field is being edited.
    ///
    /// The search query applies on every keystroke; price fields apply on enter.
    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(mut edit) = self.editing.take() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.dashboard.set_criteria(edit.original);
                return;
            }
            KeyCode::Enter => {
                let criteria = edit.field.apply(self.dashboard.criteria(), &edit.buffer);
                self.dashboard.set_criteria(criteria);
                return;
            }
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                edit.buffer.push(c);
            }
            _ => {}
        }

        if edit.field == FilterInput::Query {
            let criteria = edit.field.apply(self.dashboard.criteria(), &edit.buffer);
            self.dashboard.set_criteria(criteria);
        }
        self.editing = Some(edit);
    }

    fn handle_listings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.dashboard.step_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.dashboard.step_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.select_first_listing(),
            KeyCode::Char('G') | KeyCode::End => self.select_last_listing(),
            KeyCode::Char('l') | KeyCode::Enter => self.open_details(),
            KeyCode::Char('x') | KeyCode::Esc => self.dashboard.close_details(),
            KeyCode::Char('/') => self.start_edit(FilterInput::Query),
            KeyCode::Char('[') => self.start_edit(FilterInput::MinPrice),
            KeyCode::Char(']') => self.start_edit(FilterInput::MaxPrice),
            KeyCode::Char('c') => self.cycle_city(),
            KeyCode::Char('p') => self.cycle_min_price(),
            KeyCode::Char('P') => self.cycle_max_price(),
            KeyCode::Char('b') => self.cycle_rooms(),
            KeyCode::Char('0') => self.reset_filters(),
            _ => {}
        }
    }

    // Admin

    fn inspected_log_len(&self) -> usize {
        self.monitor.selected().map_or(0, |p| p.logs.len())
    }

    fn step_process(&mut self, offset: isize) {
        self.monitor.step_selection(offset);
        // New process, start at its tail
        self.log_viewer_state = LogViewerState::new();
    }

    /// Write the inspected process's logs to `<export-dir>/<id>.log`.
    fn download_logs(&mut self) {
        let Some(id) = self.monitor.inspected_id().map(String::from) else {
            self.set_status("No process selected");
            return;
        };
        match self.exporter.export(&self.monitor, &id) {
            Ok(path) => self.set_status(format!("Saved logs to {}", path)),
            Err(e) => {
                tracing::warn!(process = %id, error = %e, "log export failed");
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    /// Copy the inspected process's logs to the clipboard.
    fn copy_logs(&mut self) {
        let text = self
            .monitor
            .inspected_id()
            .and_then(|id| self.monitor.export_logs(id));
        let Some(text) = text else {
            self.set_status("No process selected");
            return;
        };

        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(text) {
                Ok(()) => self.set_status("Logs copied to clipboard"),
                Err(_) => self.set_status("Failed to copy to clipboard"),
            },
            Err(_) => self.set_status("Clipboard not available"),
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) {
        let total = self.inspected_log_len();
        match (key.code, self.active_panel) {
            (KeyCode::Char('j') | KeyCode::Down, ActivePanel::List) => self.step_process(1),
            (KeyCode::Char('k') | KeyCode::Up, ActivePanel::List) => self.step_process(-1),
            (KeyCode::Char('j') | KeyCode::Down, ActivePanel::Logs) => {
                self.log_viewer_state.scroll_down(total)
            }
            (KeyCode::Char('k') | KeyCode::Up, ActivePanel::Logs) => {
                self.log_viewer_state.scroll_up()
            }
            (KeyCode::Char('g') | KeyCode::Home, ActivePanel::Logs) => {
                self.log_viewer_state.scroll_to_top()
            }
            (KeyCode::Char('G') | KeyCode::End, ActivePanel::Logs) => {
                self.log_viewer_state.scroll_to_bottom(total)
            }
            (KeyCode::Char('t'), _) => self.log_viewer_state.toggle_follow(total),
            (KeyCode::Char('d'), _) => self.download_logs(),
            (KeyCode::Char('y'), _) => self.copy_logs(),
            _ => {}
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.editing.is_some() {
            self.handle_edit_key(key);
            return;
        }

        // Ctrl-W j/k/w switches panels (vim-style)
        if self.waiting_for_panel_key {
            self.waiting_for_panel_key = false;
            if matches!(
                key.code,
                KeyCode::Char('j' | 'k' | 'w') | KeyCode::Down | KeyCode::Up
            ) && self.view_mode == ViewMode::Admin
            {
                self.switch_panel();
            }
            return;
        }

        if key.code == KeyCode::Char('w') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.waiting_for_panel_key = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Tab => self.toggle_view_mode(),
            _ => match self.view_mode {
                ViewMode::Listings => self.handle_listings_key(key),
                ViewMode::Admin => self.handle_admin_key(key),
            },
        }
    }

    /// Poll for events and handle them.
    pub fn poll_events(&mut self, timeout: Duration) -> std::io::Result<bool> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Render the UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header (1 line + borders)
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Header::render(
            frame,
            chunks[0],
            self.view_mode,
            &self.dashboard,
            &self.monitor,
            &self.theme,
        );

        match self.view_mode {
            ViewMode::Listings => self.render_listings(frame, chunks[1]),
            ViewMode::Admin => self.render_admin(frame, chunks[1]),
        }

        Footer::render(
            frame,
            chunks[2],
            self.view_mode,
            self.status_message(),
            &self.theme,
        );

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_listings(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let editing = self
            .editing
            .as_ref()
            .map(|edit| (edit.field, edit.buffer.as_str()));
        FilterBar::render(
            frame,
            rows[0],
            self.dashboard.criteria(),
            editing,
            &self.theme,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(32),
                Constraint::Percentage(28),
            ])
            .split(rows[1]);

        ListingMap::render(
            frame,
            columns[0],
            &self.dashboard,
            &mut self.markers,
            &self.theme,
        );
        ListingList::render(
            frame,
            columns[1],
            &self.dashboard,
            self.editing.is_none(),
            &self.theme,
        );
        ListingDetail::render(frame, columns[2], &self.dashboard, &self.theme);
    }

    fn render_admin(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        ProcessList::render(
            frame,
            columns[0],
            &self.monitor,
            self.active_panel == ActivePanel::List,
            &self.theme,
        );

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(5)])
            .split(columns[1]);

        let selected = self.monitor.selected();
        ProcessDetail::render(frame, right[0], selected, &self.theme);

        let lines: &[String] = selected.map_or(&[], |p| p.logs.as_slice());
        LogViewer::render_panel(
            frame,
            right[1],
            selected.map(|p| p.id.as_str()),
            lines,
            &self.log_viewer_state,
            self.active_panel == ActivePanel::Logs,
            &self.theme,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        use ratatui::style::Style;
        use ratatui::widgets::{Block, Borders, Paragraph};

        let area = centered_rect(60, 70, frame.area());

        let help_text = r#"
  Keyboard Shortcuts
  ──────────────────

  Listings
  j/k / ↑↓     Move highlight
  g / G        First/last result
  l / Enter    Open details
  x / Esc      Close details
  /            Search (applies as you type)
  [ / ]        Type min/max price
  p / P        Cycle min/max price presets
  c            Cycle city
  b            Cycle beds/baths presets
  0            Reset filters

  Admin
  j/k / ↑↓     Navigate processes / scroll logs
  Ctrl-W j/k   Switch between processes and logs
  g / G        Top/bottom of logs
  t            Toggle follow mode
  d            Download logs to <id>.log
  y            Copy logs to clipboard

  Global
  Tab          Switch Listings/Admin
  ?            This help
  q / Ctrl+C   Quit

  Press any key to close
"#;

        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .style(Style::default().bg(self.theme.muted)),
            )
            .style(
                Style::default()
                    .fg(self.theme.foreground)
                    .bg(self.theme.muted),
            );

        frame.render_widget(paragraph, area);
    }
}

/// The preset after `current`, or the first preset if `current` is not one.
fn next_preset<T: PartialEq + Copy>(presets: &[T], current: &T) -> T {
    match presets.iter().position(|p| p == current) {
        Some(i) => presets[(i + 1) % presets.len()],
        None => presets[0],
    }
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
