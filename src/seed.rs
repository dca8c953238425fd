// Synthetic fallback data, used when tasks.json is empty after
// normalization. Deterministic on purpose so repeated runs and tests see
// the same collection.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Task, TaskPriority, TaskStatus};

const ACTIVITIES: [&str; 5] = [
    "Discovery call",
    "Product demo",
    "Proposal draft",
    "Contract follow-up",
    "Renewal check-in",
];

const ACCOUNTS: [&str; 8] = [
    "Acme Corp",
    "Globex",
    "Initech",
    "Umbrella Ltd",
    "Stark Industries",
    "Wayne Enterprises",
    "Hooli",
    "Vandelay Industries",
];

const PRIORITIES: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

const STATUSES: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

// Generate `n` synthetic sales tasks, one day apart walking back from
// `now`. Revenue and hours vary with the index so derived metrics are not
// degenerate.
pub fn generate_sales_tasks(n: usize, now: DateTime<Utc>) -> Vec<Task> {
    (0..n)
        .map(|i| {
            let created_at = now - Duration::days(i as i64 + 1);
            let status = STATUSES[i % STATUSES.len()].clone();
            let completed_at = if status.is_done() {
                Some(created_at + Duration::hours(24))
            } else {
                None
            };
            let revenue = 250.0 + (i % 12) as f64 * 175.0;
            let time_taken = 1.0 + (i % 7) as f64 * 1.5;

            Task {
                id: format!("seed-{i:04}"),
                title: format!(
                    "{} - {}",
                    ACTIVITIES[i % ACTIVITIES.len()],
                    ACCOUNTS[i % ACCOUNTS.len()]
                ),
                revenue,
                time_taken,
                priority: PRIORITIES[i % PRIORITIES.len()].clone(),
                status,
                notes: None,
                created_at,
                completed_at,
            }
        })
        .collect()
}
