//! Main TUI application state and logic

use crate::backend::Backend;
use crate::editor::form::Field;
use crate::editor::sync::{SyncController, SyncOutcome, SyncRequest};
use crate::editor::RecordEditor;
use crate::ui::panes::{
    render_form_pane, render_records_pane, render_status_bar, FormRenderData, RecordsRenderData,
    StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend as TerminalBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Records,
}

impl Focus {
    /// Move focus forward: through the form fields, then the list
    pub fn next(self) -> Self {
        match self {
            Focus::Field(field) => field.next().map_or(Focus::Records, Focus::Field),
            Focus::Records => Focus::Field(Field::Name),
        }
    }

    /// Move focus backward
    pub fn prev(self) -> Self {
        match self {
            Focus::Field(field) => field.prev().map_or(Focus::Records, Focus::Field),
            Focus::Records => Focus::Field(Field::Balance),
        }
    }
}

/// The main application state
pub struct App {
    /// Form, errors, records and edit mode
    pub editor: RecordEditor,

    /// Currently focused pane or field
    pub focus: Focus,

    /// Index of the highlighted record
    pub selected: usize,

    /// First visible record in the list pane
    pub records_scroll: usize,

    /// Backend calls dispatched but not yet applied
    pub in_flight: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,

    sync: SyncController<dyn Backend>,
    runtime: Handle,
    outcomes_tx: UnboundedSender<SyncOutcome>,
    outcomes_rx: UnboundedReceiver<SyncOutcome>,
}

impl App {
    /// Create a new app talking to `backend`, running calls on `runtime`
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        App {
            editor: RecordEditor::new(),
            focus: Focus::Field(Field::Name),
            selected: 0,
            records_scroll: 0,
            in_flight: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            sync: SyncController::new(backend),
            runtime,
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// Issue the initial list load
    pub fn start(&mut self) {
        self.status_message = "Loading records...".to_string();
        let request = self.editor.activate();
        self.dispatch(request);
    }

    /// Run the TUI application
    pub fn run<B: TerminalBackend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.start();

        loop {
            self.drain_outcomes();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so finished backend calls get applied
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Start a backend call in the background
    fn dispatch(&mut self, request: SyncRequest) {
        self.in_flight += 1;
        self.sync
            .spawn(&self.runtime, request, self.outcomes_tx.clone());
    }

    /// Apply every outcome that has arrived since the last frame
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: SyncOutcome) {
        match self.editor.apply(outcome) {
            Ok(applied) => {
                self.status_message = applied.to_string();
                self.status_is_error = false;
            }
            Err(err) => {
                self.status_message = err.to_string();
                self.status_is_error = true;
            }
        }
        let count = self.editor.records().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Form (left) | Records (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let editing = self.editor.editing_target();

        render_form_pane(
            frame,
            columns[0],
            FormRenderData {
                form: self.editor.form(),
                errors: self.editor.errors(),
                editing,
                focused_field: match self.focus {
                    Focus::Field(field) => Some(field),
                    Focus::Records => None,
                },
            },
        );

        render_records_pane(
            frame,
            columns[1],
            RecordsRenderData {
                records: self.editor.records(),
                selected: self.selected,
                editing: editing.map(|r| &r.id),
                is_focused: self.focus == Focus::Records,
            },
            &mut self.records_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                is_error: self.status_is_error,
                editing: editing.map(|r| &r.id),
                in_flight: self.in_flight,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => self.cancel_edit(),
            _ => match self.focus {
                Focus::Field(field) => self.handle_form_key(field, key),
                Focus::Records => self.handle_records_key(key.code),
            },
        }
    }

    fn handle_form_key(&mut self, field: Field, key: KeyEvent) {
        match key.code {
            // Shift is part of the character; other chords are not text
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                self.editor.push_char(field, c)
            }
            KeyCode::Backspace => self.editor.pop_char(field),
            KeyCode::Enter => self.save(),
            KeyCode::Up => {
                if let Some(prev) = field.prev() {
                    self.focus = Focus::Field(prev);
                }
            }
            KeyCode::Down => self.focus = self.focus.next(),
            _ => {}
        }
    }

    fn handle_records_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < self.editor.records().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('r') => {
                self.status_message = "Reloading records...".to_string();
                self.status_is_error = false;
                let request = self.editor.activate();
                self.dispatch(request);
            }
            _ => {}
        }
    }

    /// Submit the form: update while editing, create otherwise
    fn save(&mut self) {
        let editing = self.editor.is_editing();
        match self.editor.submit() {
            Some(request) => {
                info!(editing, "submitting form");
                self.status_message = if editing {
                    "Updating record...".to_string()
                } else {
                    "Saving record...".to_string()
                };
                self.status_is_error = false;
                self.dispatch(request);
            }
            None => {
                let count = self.editor.errors().len();
                debug!(count, "form rejected by validation");
                self.status_message = format!("Fix {} field error(s) before saving", count);
                self.status_is_error = true;
            }
        }
    }

    fn edit_selected(&mut self) {
        if self.editor.begin_edit_at(self.selected) {
            self.focus = Focus::Field(Field::Name);
            if let Some(record) = self.editor.editing_target() {
                self.status_message = format!("Editing record {}", record.id);
                self.status_is_error = false;
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(record) = self.editor.records().get(self.selected) else {
            return;
        };
        let id = record.id.clone();
        self.status_message = format!("Deleting record {}...", id);
        self.status_is_error = false;
        let request = self.editor.delete_request(id);
        self.dispatch(request);
    }

    fn cancel_edit(&mut self) {
        if self.editor.is_editing() {
            self.editor.cancel_edit();
            self.status_message = "Edit cancelled".to_string();
            self.status_is_error = false;
        }
    }
}
