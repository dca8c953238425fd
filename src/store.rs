/*
Task store: canonical task collection, one-slot delete buffer, and the
single-shot initial load. Mutations are synchronous; derived views are
memoized against a revision counter and recomputed on read.
*/

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::logic::{self, DerivedTask, Metrics};
use crate::models::{Task, TaskDraft, TaskPatch};
use crate::normalize::normalize;
use crate::seed::generate_sales_tasks;

pub const TASKS_PATH: &str = "data/tasks.json";

// Number of synthetic tasks installed when the document is empty.
pub const SEED_COUNT: usize = 50;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read task document: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse task document: {0}")]
    Parse(#[from] serde_json::Error),
}

// Proof that a load is in flight, carrying the epoch observed when it
// started. apply_load refuses tickets from a previous epoch, so a result
// arriving after shutdown() cannot mutate the store.
#[derive(Debug)]
pub struct LoadTicket {
    epoch: u64,
}

// Memoized derived views, valid for exactly one store revision.
struct Views {
    rev: u64,
    sorted: Vec<DerivedTask>,
    metrics: Metrics,
}

pub struct TaskStore {
    tasks: Vec<Task>,
    last_deleted: Option<Task>,
    loading: bool,
    error: Option<String>,
    fetched: bool,
    epoch: u64,
    rev: u64,
    views: Option<Views>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            last_deleted: None,
            loading: true,
            error: None,
            fetched: false,
            epoch: 0,
            rev: 0,
            views: None,
        }
    }

    // Every mutation bumps the revision so cached views go stale.
    fn touch(&mut self) {
        self.rev += 1;
    }

    // ---------------------------------
    // Initial load
    // ---------------------------------

    // Claim the single load slot. Returns None on every call after the
    // first; a repeat call still resolves the loading flag so consumers
    // are not left waiting on a load that will never run.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.fetched {
            self.loading = false;
            return None;
        }
        self.fetched = true;
        self.loading = true;
        Some(LoadTicket { epoch: self.epoch })
    }

    // Apply the outcome of a load started with begin_load. A stale ticket
    // (store shut down since) is discarded without touching state. A load
    // failure records a message and leaves the collection empty; no retry.
    // An empty normalized set falls back to seed data.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<Task>, LoadError>) {
        if ticket.epoch != self.epoch {
            info!("discarding load result for torn-down store");
            return;
        }

        match result {
            Ok(tasks) => {
                if tasks.is_empty() {
                    warn!(
                        count = SEED_COUNT,
                        "task document empty after normalization, using seed data"
                    );
                    self.tasks = generate_sales_tasks(SEED_COUNT, Utc::now());
                } else {
                    info!(count = tasks.len(), "loaded tasks");
                    self.tasks = tasks;
                }
            }
            Err(e) => {
                error!(error = %e, "task load failed");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
        self.touch();
    }

    // Tear the store down: any in-flight load result is ignored from here
    // on, and the store stops reporting a pending load.
    pub fn shutdown(&mut self) {
        self.epoch += 1;
        self.loading = false;
    }

    // ---------------------------------
    // Mutations
    // ---------------------------------

    // Always succeeds. Assigns an id when the draft has none, stamps
    // createdAt, stamps completedAt iff the draft arrives already Done,
    // and applies the duration floor. Appends at the end.
    pub fn add_task(&mut self, draft: TaskDraft) -> Task {
        let now = Utc::now();
        let task = Task {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft.title,
            revenue: draft.revenue.max(0.0),
            time_taken: if draft.time_taken > 0.0 {
                draft.time_taken
            } else {
                1.0
            },
            completed_at: draft.status.is_done().then_some(now),
            status: draft.status,
            priority: draft.priority,
            notes: draft.notes,
            created_at: now,
        };
        self.tasks.push(task.clone());
        self.touch();
        task
    }

    // Merge a patch onto the matching task. A transition into Done stamps
    // completedAt to now, overriding any caller-supplied value; once set it
    // is never cleared. Unknown id is a silent no-op.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;

        let was_done = task.status.is_done();

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(revenue) = patch.revenue {
            task.revenue = revenue.max(0.0);
        }
        if let Some(time_taken) = patch.time_taken {
            task.time_taken = if time_taken > 0.0 { time_taken } else { 1.0 };
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(notes) = patch.notes {
            task.notes = Some(notes);
        }
        if let Some(completed_at) = patch.completed_at {
            task.completed_at = Some(completed_at);
        }

        if !was_done && task.status.is_done() {
            task.completed_at = Some(Utc::now());
        }

        let updated = task.clone();
        self.touch();
        Some(updated)
    }

    // Remove the matching task and move it into the delete buffer. The
    // buffer is only overwritten on an actual match: a not-found delete
    // must not erase an existing undo opportunity.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.last_deleted = Some(self.tasks.remove(pos));
        self.touch();
        true
    }

    // Restore the buffered task, appended at the end (the original position
    // is not remembered). One level only: the buffer is emptied.
    pub fn undo_delete(&mut self) -> Option<Task> {
        let task = self.last_deleted.take()?;
        self.tasks.push(task.clone());
        self.touch();
        Some(task)
    }

    // Forfeit the undo opportunity.
    pub fn clear_last_deleted(&mut self) {
        self.last_deleted = None;
    }

    // ---------------------------------
    // Reads
    // ---------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn last_deleted(&self) -> Option<&Task> {
        self.last_deleted.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // Recompute derived views when the revision moved since the cached
    // copy; otherwise hand back the memo.
    fn views(&mut self) -> &Views {
        let stale = match &self.views {
            Some(v) => v.rev != self.rev,
            None => true,
        };
        if stale {
            let sorted = logic::sort_tasks(self.tasks.iter().map(logic::with_derived).collect());
            let metrics = logic::compute_metrics(&self.tasks);
            self.views = Some(Views {
                rev: self.rev,
                sorted,
                metrics,
            });
        }
        self.views.as_ref().expect("views freshly computed")
    }

    pub fn derived_sorted(&mut self) -> &[DerivedTask] {
        &self.views().sorted
    }

    pub fn metrics(&mut self) -> Metrics {
        self.views().metrics
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

// Read and normalize the task document. Absence of the file and unparseable
// content both surface as LoadError; the caller decides what absorbs it.
pub async fn fetch_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>, LoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    let doc: Value = serde_json::from_str(&text)?;
    Ok(normalize(&doc, Utc::now()))
}

pub type SharedStore = Arc<Mutex<TaskStore>>;

// Run the whole load against a shared store. The lock is released across
// the fetch; the ticket makes the late re-lock safe.
pub async fn load_into(store: &SharedStore, path: impl AsRef<Path>) {
    let ticket = {
        let mut guard = store.lock().expect("store lock poisoned");
        guard.begin_load()
    };
    let Some(ticket) = ticket else {
        return;
    };

    let result = fetch_tasks(path).await;

    let mut guard = store.lock().expect("store lock poisoned");
    guard.apply_load(ticket, result);
}
