// --------------------------------------------------
// HTTP handlers for the read surface: load state, canonical tasks, the
// sorted derived view, aggregate metrics, and the delete buffer.
// --------------------------------------------------

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::{DerivedTask, Metrics};
use crate::models::Task;
use crate::store::SharedStore;

#[derive(Debug, Serialize)]
pub struct LoadStateResponse {
    pub loading: bool,
    pub error: Option<String>,
}

// -----------------------------
// GET /api/state
// Loading flag and load error, if any
// -----------------------------
pub async fn get_state(State(store): State<SharedStore>) -> Json<LoadStateResponse> {
    let store = store.lock().expect("store lock poisoned");
    Json(LoadStateResponse {
        loading: store.loading(),
        error: store.error().map(str::to_string),
    })
}

// -----------------------------
// GET /api/tasks
// Canonical collection, insertion order
// -----------------------------
pub async fn get_tasks(State(store): State<SharedStore>) -> Json<Vec<Task>> {
    let store = store.lock().expect("store lock poisoned");
    Json(store.tasks().to_vec())
}

// -----------------------------
// GET /api/tasks/derived
// Derived view, ROI-descending order
// -----------------------------
pub async fn get_derived(State(store): State<SharedStore>) -> Json<Vec<DerivedTask>> {
    let mut store = store.lock().expect("store lock poisoned");
    Json(store.derived_sorted().to_vec())
}

// -----------------------------
// GET /api/metrics
// Aggregate metrics over the whole collection
// -----------------------------
pub async fn get_metrics(State(store): State<SharedStore>) -> Json<Metrics> {
    let mut store = store.lock().expect("store lock poisoned");
    Json(store.metrics())
}

// -----------------------------
// GET /api/tasks/deleted
// Delete-buffer contents, null when empty
// -----------------------------
pub async fn get_last_deleted(State(store): State<SharedStore>) -> Json<Option<Task>> {
    let store = store.lock().expect("store lock poisoned");
    Json(store.last_deleted().cloned())
}
