use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Task status. The closed set is Todo / In Progress / Done, but raw input
// is not validated against it: unknown strings are carried through in Other
// so a malformed record survives a load/save round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Other(String),
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Todo" => TaskStatus::Todo,
            "In Progress" => TaskStatus::InProgress,
            "Done" => TaskStatus::Done,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(s: TaskStatus) -> Self {
        match s {
            TaskStatus::Todo => "Todo".to_string(),
            TaskStatus::InProgress => "In Progress".to_string(),
            TaskStatus::Done => "Done".to_string(),
            TaskStatus::Other(s) => s,
        }
    }
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        *self == TaskStatus::Done
    }
}

// Same pass-through rule as TaskStatus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<String> for TaskPriority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Low" => TaskPriority::Low,
            "Medium" => TaskPriority::Medium,
            "High" => TaskPriority::High,
            _ => TaskPriority::Other(s),
        }
    }
}

impl From<TaskPriority> for String {
    fn from(p: TaskPriority) -> Self {
        match p {
            TaskPriority::Low => "Low".to_string(),
            TaskPriority::Medium => "Medium".to_string(),
            TaskPriority::High => "High".to_string(),
            TaskPriority::Other(s) => s,
        }
    }
}

// Canonical task entity. Field names follow the tasks.json document format.
//
// Invariants upheld by the normalizer and the store:
// - revenue >= 0
// - time_taken > 0, defaulted to 1 when input is invalid (duration floor)
// - created_at immutable after creation
// - completed_at stamped once on the transition into Done, never cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub revenue: f64,
    pub time_taken: f64,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

// Input for creating a task. The store assigns id (when absent) and both
// timestamps; callers cannot supply created_at or completed_at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub revenue: f64,
    pub time_taken: f64,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

// Partial update. Absent fields are left untouched; id and created_at are
// not patchable. completed_at is only honored when the patch does not itself
// complete the task (the store stamps fresh completions).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub time_taken: Option<f64>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}
