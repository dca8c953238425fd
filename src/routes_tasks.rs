// --------------------------------------------------
// HTTP handlers for the task mutation surface.
//
// Responsibilities:
// - Create / update / delete tasks
// - Undo the last delete, clear the delete buffer
//
// No logic lives here; every handler locks the store, delegates, and
// serializes the result. Missing-id update/delete are not errors (the
// store treats them as no-ops), so they answer 200 with a null/false body.
// --------------------------------------------------

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::models::{Task, TaskDraft, TaskPatch};
use crate::store::SharedStore;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// -----------------------------
// POST /api/tasks
// Creates a task from a draft; id and timestamps are store-assigned
// -----------------------------
pub async fn create_task(
    State(store): State<SharedStore>,
    Json(draft): Json<TaskDraft>,
) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock poisoned");
    let task = store.add_task(draft);
    info!(id = %task.id, "task created");
    Json(task)
}

// -----------------------------
// PUT /api/tasks/:id
// Merges a partial update onto the task; null body when the id is unknown
// -----------------------------
pub async fn update_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Json<Option<Task>> {
    let mut store = store.lock().expect("store lock poisoned");
    Json(store.update_task(&id, patch))
}

// -----------------------------
// DELETE /api/tasks/:id
// Moves the task into the one-slot delete buffer
// -----------------------------
pub async fn delete_task(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock poisoned");
    let deleted = store.delete_task(&id);
    if deleted {
        info!(%id, "task deleted");
    }
    Json(DeleteResponse { deleted })
}

// -----------------------------
// POST /api/tasks/undo
// Restores the buffered task (appended at the end); null when empty
// -----------------------------
pub async fn undo_delete(State(store): State<SharedStore>) -> Json<Option<Task>> {
    let mut store = store.lock().expect("store lock poisoned");
    Json(store.undo_delete())
}

// -----------------------------
// POST /api/tasks/deleted/clear
// Forfeits the undo opportunity
// -----------------------------
pub async fn clear_last_deleted(State(store): State<SharedStore>) -> impl IntoResponse {
    let mut store = store.lock().expect("store lock poisoned");
    store.clear_last_deleted();
    Json(OkResponse { ok: true })
}
