//! Carrying out editor requests against the backend
//!
//! [`SyncController::perform`] turns a [`SyncRequest`] into a
//! [`SyncOutcome`] without touching editor state. The UI runs it as a
//! background task via [`SyncController::spawn`] and applies outcomes on its
//! own thread; the awaiting helpers ([`load_all`](SyncController::load_all),
//! [`save`](SyncController::save), [`delete`](SyncController::delete)) do
//! both steps in sequence.

use super::{Applied, RecordEditor, SyncError};
use crate::backend::{Backend, BackendError};
use crate::record::{Record, RecordDraft, RecordId};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// A backend call the editor wants made
#[derive(Debug, Clone, PartialEq)]
pub enum SyncRequest {
    LoadAll,
    Create(RecordDraft),
    /// Full record (target id with the edited fields)
    Update(Record),
    Delete(RecordId),
}

/// Result of an update: the save itself, then the list re-fetch
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Rejected(BackendError),
    Saved {
        refreshed: Result<Vec<Record>, BackendError>,
    },
}

/// A finished backend call, ready to be applied with
/// [`RecordEditor::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Loaded(Result<Vec<Record>, BackendError>),
    Created(Result<Record, BackendError>),
    Updated {
        id: RecordId,
        outcome: UpdateOutcome,
    },
    Deleted {
        id: RecordId,
        result: Result<(), BackendError>,
    },
}

/// Issues editor requests to a [`Backend`]
pub struct SyncController<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for SyncController<B> {
    fn clone(&self) -> Self {
        SyncController {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend + ?Sized + 'static> SyncController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        SyncController { backend }
    }

    /// Make the backend call(s) for one request
    pub async fn perform(&self, request: SyncRequest) -> SyncOutcome {
        debug!(?request, "performing");
        match request {
            SyncRequest::LoadAll => SyncOutcome::Loaded(self.backend.list().await),
            SyncRequest::Create(draft) => SyncOutcome::Created(self.backend.create(&draft).await),
            SyncRequest::Update(record) => {
                let outcome = match self.backend.update(&record).await {
                    // The service may recompute fields, so take its list
                    // rather than patching the local copy.
                    Ok(_) => UpdateOutcome::Saved {
                        refreshed: self.backend.list().await,
                    },
                    Err(e) => UpdateOutcome::Rejected(e),
                };
                SyncOutcome::Updated {
                    id: record.id,
                    outcome,
                }
            }
            SyncRequest::Delete(id) => {
                let result = self.backend.delete(&id).await;
                SyncOutcome::Deleted { id, result }
            }
        }
    }

    /// Run `request` on `runtime` and deliver its outcome to `outcomes`.
    ///
    /// Tasks are independent; outcomes arrive in completion order.
    pub fn spawn(
        &self,
        runtime: &Handle,
        request: SyncRequest,
        outcomes: UnboundedSender<SyncOutcome>,
    ) {
        let controller = self.clone();
        runtime.spawn(async move {
            let outcome = controller.perform(request).await;
            // The receiver is gone only when the UI has shut down.
            let _ = outcomes.send(outcome);
        });
    }

    /// Fetch the full list and replace the editor's records
    pub async fn load_all(&self, editor: &mut RecordEditor) -> Result<Applied, SyncError> {
        let outcome = self.perform(editor.activate()).await;
        editor.apply(outcome)
    }

    /// Submit the form: create or update depending on the edit mode.
    ///
    /// Returns `None`, without contacting the backend, when validation
    /// fails.
    pub async fn save(&self, editor: &mut RecordEditor) -> Option<Result<Applied, SyncError>> {
        let request = editor.submit()?;
        let outcome = self.perform(request).await;
        Some(editor.apply(outcome))
    }

    pub async fn delete(
        &self,
        editor: &mut RecordEditor,
        id: RecordId,
    ) -> Result<Applied, SyncError> {
        let outcome = self.perform(editor.delete_request(id)).await;
        editor.apply(outcome)
    }
}
