/*
Normalization of raw task records.
Input is the parsed tasks.json document: untyped JSON that may be missing
fields, carry numbers as strings, or not be an array at all. Normalization
never fails; every record comes out as a well-formed Task.
*/

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{Task, TaskPriority, TaskStatus};

// Coerce a JSON value to f64. Numbers pass through, numeric strings parse,
// everything else (absent, null, objects, "abc") is None.
fn coerce_number(v: Option<&Value>) -> Option<f64> {
    match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_string(v: Option<&Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn coerce_timestamp(v: Option<&Value>) -> Option<DateTime<Utc>> {
    match v {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

// Normalize one record at position `idx` within the input sequence.
//
// Defaults:
// - createdAt: synthetic `now - (idx + 1) days` when absent, so records
//   without timestamps keep a stable, collision-free order (earlier
//   positions are more recent).
// - completedAt: `createdAt + 24h` for Done tasks with no explicit value.
// - revenue: 0 when unparseable, clamped to >= 0.
// - timeTaken: 1 when not strictly positive (duration floor).
// - id: fresh UUID when absent.
fn normalize_record(record: &Value, idx: usize, now: DateTime<Utc>) -> Task {
    let created_at = coerce_timestamp(record.get("createdAt"))
        .unwrap_or_else(|| now - Duration::days(idx as i64 + 1));

    let status: TaskStatus = coerce_string(record.get("status"))
        .unwrap_or_default()
        .into();

    let completed_at = coerce_timestamp(record.get("completedAt")).or_else(|| {
        if status.is_done() {
            Some(created_at + Duration::hours(24))
        } else {
            None
        }
    });

    let revenue = coerce_number(record.get("revenue"))
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    let time_taken = coerce_number(record.get("timeTaken"))
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(1.0);

    Task {
        id: coerce_string(record.get("id")).unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: coerce_string(record.get("title")).unwrap_or_default(),
        revenue,
        time_taken,
        priority: TaskPriority::from(coerce_string(record.get("priority")).unwrap_or_default()),
        status,
        notes: coerce_string(record.get("notes")),
        created_at,
        completed_at,
    }
}

// Normalize an untrusted document into tasks. Pure: `now` is passed in so
// synthetic timestamps are a function of the arguments only. Non-array
// input is treated as empty.
pub fn normalize(input: &Value, now: DateTime<Utc>) -> Vec<Task> {
    let records = match input.as_array() {
        Some(arr) => arr.as_slice(),
        None => &[],
    };

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| normalize_record(record, idx, now))
        .collect()
}
