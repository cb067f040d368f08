//! The record editor: form state, validation and list reconciliation
//!
//! [`RecordEditor`] is a plain state container. User actions go through its
//! transition methods; those that need the backend return a
//! [`SyncRequest`](sync::SyncRequest) instead of performing I/O. Once the
//! request has been carried out (see [`sync`]) the resulting
//! [`SyncOutcome`](sync::SyncOutcome) is handed back to
//! [`RecordEditor::apply`], which is the only place the record list changes.
//!
//! # Edit sessions
//!
//! ```text
//!            begin_edit(record)
//!   Idle ───────────────────────▶ Editing(record)
//!    ▲                                 │
//!    └──── successful update ──────────┤
//!    └──── cancel_edit ────────────────┘
//! ```
//!
//! `submit` dispatches on the current mode: `Update` while editing,
//! `Create` otherwise.

pub mod form;
pub mod sync;
pub mod validate;

use crate::backend::BackendError;
use crate::record::{Record, RecordId};
use form::{Field, FormState};
use std::fmt;
use sync::{SyncOutcome, SyncRequest, UpdateOutcome};
use thiserror::Error;
use tracing::{info, warn};
use validate::{validate, ErrorState};

/// Whether the form is creating a new record or editing an existing one
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(Record),
}

/// Which backend operation an outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Refresh,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::Load => "load records",
            Operation::Create => "create record",
            Operation::Update => "update record",
            Operation::Refresh => "refresh records",
            Operation::Delete => "delete record",
        };
        write!(f, "{}", text)
    }
}

/// A backend operation that failed; local state was left as it was
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not {operation}: {source}")]
pub struct SyncError {
    pub operation: Operation,
    #[source]
    pub source: BackendError,
}

/// What applying a successful outcome changed
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Loaded { count: usize },
    Created { id: RecordId },
    /// The record was saved; `refreshed` is false when the follow-up list
    /// fetch failed and the list may be stale.
    Updated { id: RecordId, refreshed: bool },
    Deleted { id: RecordId, removed: usize },
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applied::Loaded { count } => write!(f, "Loaded {} record(s)", count),
            Applied::Created { id } => write!(f, "Created record {}", id),
            Applied::Updated {
                id,
                refreshed: true,
            } => write!(f, "Updated record {}", id),
            Applied::Updated {
                id,
                refreshed: false,
            } => write!(f, "Updated record {} (list refresh failed)", id),
            Applied::Deleted { id, .. } => write!(f, "Deleted record {}", id),
        }
    }
}

/// Form, errors, record list and edit mode for the customer screen
#[derive(Debug, Clone, Default)]
pub struct RecordEditor {
    form: FormState,
    errors: ErrorState,
    records: Vec<Record>,
    mode: EditMode,
}

impl RecordEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    /// The record being edited, if any
    pub fn editing_target(&self) -> Option<&Record> {
        match &self.mode {
            EditMode::Editing(record) => Some(record),
            EditMode::Idle => None,
        }
    }

    /// Request issued once when the screen becomes active
    pub fn activate(&self) -> SyncRequest {
        SyncRequest::LoadAll
    }

    /// Replace one field's draft value.
    ///
    /// Existing errors are kept until the next submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.form.get_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.form.get_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.form.get_mut(field).pop();
    }

    /// Start editing `record`, copying its values into the form
    pub fn begin_edit(&mut self, record: &Record) {
        self.form = FormState::from_record(record);
        self.mode = EditMode::Editing(record.clone());
    }

    /// Start editing the record at `index` in the list
    pub fn begin_edit_at(&mut self, index: usize) -> bool {
        match self.records.get(index).cloned() {
            Some(record) => {
                self.begin_edit(&record);
                true
            }
            None => false,
        }
    }

    /// Abandon the current edit session and clear the form
    pub fn cancel_edit(&mut self) {
        self.mode = EditMode::Idle;
        self.form.clear();
        self.errors.clear();
    }

    /// Validate the form and, if it is clean, produce the save request.
    ///
    /// Returns `None` when validation failed; the errors are then available
    /// from [`errors`](Self::errors) and no backend call must be made.
    pub fn submit(&mut self) -> Option<SyncRequest> {
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            return None;
        }
        let draft = self.form.to_draft()?;
        match &self.mode {
            EditMode::Editing(target) => Some(SyncRequest::Update(target.with_draft(draft))),
            EditMode::Idle => Some(SyncRequest::Create(draft)),
        }
    }

    pub fn delete_request(&self, id: RecordId) -> SyncRequest {
        SyncRequest::Delete(id)
    }

    /// Reconcile a finished backend call into local state.
    ///
    /// On failure nothing is changed and the error is returned for
    /// reporting.
    pub fn apply(&mut self, outcome: SyncOutcome) -> Result<Applied, SyncError> {
        match outcome {
            SyncOutcome::Loaded(Ok(records)) => {
                let count = records.len();
                self.records = records;
                info!(count, "records loaded");
                Ok(Applied::Loaded { count })
            }
            SyncOutcome::Loaded(Err(source)) => Err(failed(Operation::Load, source)),

            SyncOutcome::Created(Ok(record)) => {
                let id = record.id.clone();
                self.records.push(record);
                self.form.clear();
                info!(%id, "record created");
                Ok(Applied::Created { id })
            }
            SyncOutcome::Created(Err(source)) => Err(failed(Operation::Create, source)),

            SyncOutcome::Updated {
                outcome: UpdateOutcome::Rejected(source),
                ..
            } => Err(failed(Operation::Update, source)),
            SyncOutcome::Updated {
                id,
                outcome: UpdateOutcome::Saved { refreshed },
            } => {
                self.mode = EditMode::Idle;
                self.form.clear();
                info!(%id, "record updated");
                let refreshed = match refreshed {
                    Ok(records) => {
                        self.records = records;
                        true
                    }
                    Err(source) => {
                        // The save itself succeeded; keep showing the old list.
                        let err = SyncError {
                            operation: Operation::Refresh,
                            source,
                        };
                        warn!(error = %err, "list left stale after update");
                        false
                    }
                };
                Ok(Applied::Updated { id, refreshed })
            }

            SyncOutcome::Deleted { id, result: Ok(()) } => {
                let before = self.records.len();
                self.records.retain(|r| r.id != id);
                let removed = before - self.records.len();
                info!(%id, removed, "record deleted");
                Ok(Applied::Deleted { id, removed })
            }
            SyncOutcome::Deleted {
                result: Err(source),
                ..
            } => Err(failed(Operation::Delete, source)),
        }
    }
}

fn failed(operation: Operation, source: BackendError) -> SyncError {
    let err = SyncError { operation, source };
    warn!(error = %err, "sync failed");
    err
}
