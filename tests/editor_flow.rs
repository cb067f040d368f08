// End-to-end editor flows against an in-memory record service

use async_trait::async_trait;
use bankdesk::backend::{Backend, BackendError};
use bankdesk::editor::form::{Field, FormState};
use bankdesk::editor::sync::SyncController;
use bankdesk::editor::{Applied, EditMode, Operation, RecordEditor};
use bankdesk::record::{Record, RecordDraft, RecordId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Record service kept in memory, counting every call it receives
#[derive(Default)]
struct InMemoryBackend {
    records: Mutex<Vec<Record>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl InMemoryBackend {
    fn with_records(records: Vec<Record>) -> Self {
        let next_id = records.len() + 1;
        InMemoryBackend {
            records: Mutex::new(records),
            next_id: AtomicUsize::new(next_id),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Transport {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Record>, BackendError> {
        self.check()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, draft: &RecordDraft) -> Result<Record, BackendError> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let record = Record::from_draft(RecordId::Number(id), draft.clone());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &Record) -> Result<Record, BackendError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record.clone())
            }
            None => Err(BackendError::Status {
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }

    async fn delete(&self, id: &RecordId) -> Result<(), BackendError> {
        self.check()?;
        self.records.lock().unwrap().retain(|r| &r.id != id);
        Ok(())
    }
}

fn customer(id: i64, name: &str, balance: f64) -> Record {
    Record {
        id: RecordId::Number(id),
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@bank.test", name.to_lowercase()),
        phone: "5551112222".to_string(),
        balance,
        extra: Default::default(),
    }
}

fn seeded() -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::with_records(vec![
        customer(1, "Ada", 120.0),
        customer(2, "Alan", 80.5),
        customer(3, "Grace", 300.0),
    ]))
}

fn fill(editor: &mut RecordEditor, values: [&str; 5]) {
    for (field, value) in Field::ALL.into_iter().zip(values) {
        editor.set_field(field, value);
    }
}

#[tokio::test]
async fn test_load_then_create_appends_one_record() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();

    let loaded = sync.load_all(&mut editor).await.expect("load failed");
    assert_eq!(loaded, Applied::Loaded { count: 3 });

    fill(&mut editor, ["A", "b", "a@b.com", "1234567890", "10"]);
    let applied = sync
        .save(&mut editor)
        .await
        .expect("form should be valid")
        .expect("create failed");

    assert_eq!(applied, Applied::Created { id: RecordId::Number(4) });
    assert_eq!(editor.records().len(), 4);
    assert_eq!(editor.records()[3].name, "A");
    assert_eq!(editor.form(), &FormState::default());
}

#[tokio::test]
async fn test_invalid_form_makes_no_calls() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();

    fill(&mut editor, ["A", "b", "foo", "123", "-5"]);
    assert!(sync.save(&mut editor).await.is_none());

    editor.begin_edit(&customer(1, "Ada", 120.0));
    editor.set_field(Field::Balance, "abc");
    assert!(sync.save(&mut editor).await.is_none());

    assert_eq!(backend.calls(), 0);
    assert!(editor.is_editing());
}

#[tokio::test]
async fn test_edit_session_round_trip() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();
    sync.load_all(&mut editor).await.expect("load failed");

    assert!(editor.begin_edit_at(1));
    assert_eq!(editor.form().name, "Alan");
    assert_eq!(editor.form().balance, "80.5");

    editor.set_field(Field::Balance, "95");
    let applied = sync
        .save(&mut editor)
        .await
        .expect("form should be valid")
        .expect("update failed");

    assert_eq!(
        applied,
        Applied::Updated {
            id: RecordId::Number(2),
            refreshed: true
        }
    );
    assert_eq!(editor.mode(), &EditMode::Idle);
    assert_eq!(editor.records()[1].balance, 95.0);
    assert_eq!(editor.records().len(), 3);
    // PUT followed by the list re-fetch, after the initial load
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_delete_removes_only_that_record() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();
    sync.load_all(&mut editor).await.expect("load failed");

    sync.delete(&mut editor, RecordId::Number(2))
        .await
        .expect("delete failed");

    let names: Vec<&str> = editor.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ada", "Grace"]);
}

#[tokio::test]
async fn test_offline_failures_preserve_state() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();
    sync.load_all(&mut editor).await.expect("load failed");

    backend.set_offline(true);

    let err = sync.load_all(&mut editor).await.unwrap_err();
    assert_eq!(err.operation, Operation::Load);
    assert_eq!(editor.records().len(), 3);

    fill(&mut editor, ["Linus", "linus", "linus@kernel.org", "5553334444", "1"]);
    let before = editor.form().clone();
    let err = sync.save(&mut editor).await.expect("form should be valid").unwrap_err();
    assert_eq!(err.operation, Operation::Create);
    assert_eq!(editor.form(), &before);

    let err = sync
        .delete(&mut editor, RecordId::Number(1))
        .await
        .unwrap_err();
    assert_eq!(err.operation, Operation::Delete);
    assert_eq!(editor.records().len(), 3);

    editor.begin_edit_at(0);
    editor.set_field(Field::Name, "Ada L.");
    let err = sync.save(&mut editor).await.expect("form should be valid").unwrap_err();
    assert_eq!(err.operation, Operation::Update);
    assert!(editor.is_editing());
    assert_eq!(editor.form().name, "Ada L.");
}

#[tokio::test]
async fn test_update_of_vanished_record_reports_status() {
    let backend = seeded();
    let sync = SyncController::new(Arc::clone(&backend));
    let mut editor = RecordEditor::new();

    editor.begin_edit(&customer(99, "Ghost", 1.0));
    let err = sync.save(&mut editor).await.expect("form should be valid").unwrap_err();

    assert_eq!(
        err.source,
        BackendError::Status {
            status: 404,
            body: "not found".to_string()
        }
    );
    assert!(editor.is_editing());
}
