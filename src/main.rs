use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

// Import axum routing utilities and Router
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir; // Serve static files (HTML/CSS/JS)
use tracing::info;
use tracing_subscriber::EnvFilter;

use sales_tracker::store::{self, SharedStore, TaskStore, TASKS_PATH};
use sales_tracker::{routes_metrics, routes_tasks};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state: SharedStore = Arc::new(Mutex::new(TaskStore::new()));

    // Single-shot initial load; failures are recorded on the store and
    // surfaced through /api/state, never fatal here.
    store::load_into(&state, TASKS_PATH).await;

    let api = Router::new()
        // read surface
        .route("/state", get(routes_metrics::get_state))
        .route("/metrics", get(routes_metrics::get_metrics))
        .route("/tasks/derived", get(routes_metrics::get_derived))
        .route("/tasks/deleted", get(routes_metrics::get_last_deleted))
        // mutations
        .route(
            "/tasks",
            get(routes_metrics::get_tasks).post(routes_tasks::create_task),
        )
        .route(
            "/tasks/:id",
            put(routes_tasks::update_task).delete(routes_tasks::delete_task),
        )
        .route("/tasks/undo", post(routes_tasks::undo_delete))
        .route("/tasks/deleted/clear", post(routes_tasks::clear_last_deleted))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"));

    let addr: SocketAddr = "127.0.0.1:3000".parse().expect("valid listen address");
    info!(%addr, "server running");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
