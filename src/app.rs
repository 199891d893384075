use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    widgets::{Clear, Paragraph},
};
use throbber_widgets_tui::ThrobberState;

use crate::filter::filter_templates;
use crate::grid::{self, GridState};
use crate::header::{self, InputContext, StatusState};
use crate::input::QueryInput;
use crate::loader::{self, LoadResult, LoadSession, TemplateSource};
use crate::status::LoadStatus;
use crate::theme::Theme;
use crate::types::{BrowseOutcome, TemplateCatalog, TemplateRecord, UiConfig};

/// Run a browser over the given source with default configuration.
pub fn run(source: TemplateSource) -> Result<BrowseOutcome> {
    let mut app = App::new(source, TemplateCatalog::new());
    app.run()
}

/// Mutually exclusive display modes, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated,
}

impl Drop for App {
    fn drop(&mut self) {
        self.session.cancel();
    }
}

pub struct App {
    pub catalog: TemplateCatalog,
    pub query_input: QueryInput,
    pub grid_state: GridState,
    pub theme: Theme,
    filtered: Vec<usize>,
    loading: bool,
    error: Option<String>,
    input_title: Option<String>,
    ui: UiConfig,
    throbber_state: ThrobberState,
    status: LoadStatus,
    source: TemplateSource,
    load_rx: Option<Receiver<LoadResult>>,
    session: LoadSession,
}

impl App {
    /// Start a view session: raises the loading flag and kicks off the one
    /// load cycle the session begins with.
    pub fn new(source: TemplateSource, catalog: TemplateCatalog) -> Self {
        let query_input = QueryInput::new(catalog.initial_query.clone());
        let input_title = catalog.context_label.clone();
        let (load_rx, session) = loader::spawn(source.clone());
        Self {
            catalog,
            query_input,
            grid_state: GridState::default(),
            theme: Theme::default(),
            filtered: Vec::new(),
            loading: true,
            error: None,
            input_title,
            ui: UiConfig::default(),
            throbber_state: ThrobberState::default(),
            status: LoadStatus::fetching(),
            source,
            load_rx: Some(load_rx),
            session,
        }
    }

    /// Set the active theme for the app.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Current display mode, by the fixed precedence: loading beats error
    /// beats empty beats populated.
    #[must_use]
    pub fn view_state(&self) -> ViewState<'_> {
        if self.loading {
            ViewState::Loading
        } else if let Some(message) = &self.error {
            ViewState::Error(message)
        } else if self.filtered.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    /// Run the interactive application. This is a method so callers can
    /// customize `App` fields before launching (used by the `MemeBrowser`
    /// builder in the crate root).
    pub fn run(&mut self) -> Result<BrowseOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let result = loop {
            self.pump_load_result();
            self.throbber_state.calc_next();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(outcome) = self.handle_key(key) {
                            break outcome;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        };

        ratatui::restore();
        Ok(result)
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let area = area.inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        // Header row (one line) and results below
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let (status_text, status_complete) =
            self.status.status(&self.ui.count_label, self.filtered.len());
        let title = Some(
            self.input_title
                .clone()
                .unwrap_or_else(|| self.ui.input_title.clone()),
        );
        header::render_header(
            frame,
            InputContext {
                query_input: &self.query_input,
                input_title: &title,
                area: layout[0],
                theme: &self.theme,
            },
            StatusState {
                text: &status_text,
                complete: status_complete,
                throbber_state: &self.throbber_state,
            },
        );

        let results_area = layout[1];
        let message = match self.view_state() {
            ViewState::Loading => {
                Some((self.ui.loading_text.clone(), self.theme.empty_style()))
            }
            ViewState::Error(message) => Some((message.to_string(), self.theme.error_style())),
            ViewState::Empty => Some((self.ui.empty_text.clone(), self.theme.empty_style())),
            ViewState::Populated => None,
        };

        match message {
            Some((text, style)) => render_message(frame, results_area, &text, style),
            None => grid::render_grid(
                frame,
                results_area,
                &mut self.grid_state,
                &self.filtered,
                &self.catalog.templates,
                &self.theme,
            ),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<BrowseOutcome> {
        match key.code {
            KeyCode::Esc => {
                return Some(BrowseOutcome {
                    accepted: false,
                    selection: None,
                    query: self.query_input.text().to_string(),
                });
            }
            KeyCode::Enter => {
                let selection = self.current_selection();
                return Some(BrowseOutcome {
                    accepted: true,
                    selection,
                    query: self.query_input.text().to_string(),
                });
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.reload();
            }
            KeyCode::Up => self.grid_state.move_up(),
            KeyCode::Down => self.grid_state.move_down(self.filtered.len()),
            KeyCode::Tab => self.grid_state.move_next(self.filtered.len()),
            KeyCode::BackTab => self.grid_state.move_previous(),
            _ => {
                // Remaining keys, arrow keys included, belong to the query
                // input; only actual text changes re-derive the filter.
                if self.query_input.input(key) {
                    self.refilter();
                }
            }
        }
        None
    }

    /// Discard the current load cycle and start a fresh one, back at the
    /// not-yet-loaded state.
    pub fn reload(&mut self) {
        self.session.cancel();
        let (load_rx, session) = loader::spawn(self.source.clone());
        self.load_rx = Some(load_rx);
        self.session = session;
        self.loading = true;
        self.error = None;
        self.catalog.templates = Vec::new();
        self.status = LoadStatus::fetching();
        self.refilter();
    }

    /// Poll the load cycle's channel; the first result settles the cycle.
    pub(crate) fn pump_load_result(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            // The receiver stays dropped after a commit, so the loading
            // flag falls exactly once per cycle.
            Ok(result) => self.commit_load(result),
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.commit_load(Err(crate::api::LoadError::Unclassified(String::new())));
            }
        }
    }

    fn commit_load(&mut self, result: LoadResult) {
        self.loading = false;
        match result {
            Ok(templates) => {
                self.status.mark_ready(templates.len());
                self.error = None;
                self.catalog.templates = templates;
            }
            Err(error) => {
                self.status.mark_failed();
                self.error = Some(error.user_message());
                self.catalog.templates = Vec::new();
            }
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_templates(&self.catalog.templates, self.query_input.text());
        self.grid_state.ensure_selection(self.filtered.len());
    }

    fn current_selection(&self) -> Option<TemplateRecord> {
        let selected = self.grid_state.selected()?;
        let index = *self.filtered.get(selected)?;
        self.catalog.templates.get(index).cloned()
    }
}

fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let mut message_area = area;
    if message_area.height > 1 {
        message_area.y += 1;
        message_area.height -= 1;
    }
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(Clear, message_area);
    frame.render_widget(paragraph, message_area);
}

/// Builder for a configured browser session.
pub struct MemeBrowser {
    app: App,
}

impl MemeBrowser {
    /// Browse the listing served at `endpoint`.
    #[must_use]
    pub fn remote(endpoint: impl Into<String>) -> Self {
        Self::from_source(TemplateSource::remote(endpoint))
    }

    /// Browse templates from any [`TemplateSource`].
    #[must_use]
    pub fn from_source(source: TemplateSource) -> Self {
        Self {
            app: App::new(source, TemplateCatalog::new()),
        }
    }

    #[must_use]
    pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
        self.app.input_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.app.query_input = QueryInput::new(query);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.app.set_theme(theme);
        self
    }

    #[must_use]
    pub fn with_ui_config(mut self, ui: UiConfig) -> Self {
        self.app.ui = ui;
        self
    }

    /// Run the session to completion and return what the user chose.
    pub fn run(mut self) -> Result<BrowseOutcome> {
        self.app.run()
    }
}
