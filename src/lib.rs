// Sales task tracker core.
pub mod models; // Data structures (Task, status/priority, draft, patch)
pub mod normalize; // Raw record -> well-formed Task
pub mod logic; // Derived fields, sorting, aggregate metrics
pub mod seed; // Synthetic fallback data
pub mod store; // Canonical state, delete buffer, single-shot load
pub mod routes_metrics; // HTTP handlers for the read surface
pub mod routes_tasks; // HTTP handlers for the mutation surface
