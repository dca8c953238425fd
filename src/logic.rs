/*
Derivation and metrics logic.
Pure functions over tasks; independent from HTTP / Axum for testing.
*/

use serde::Serialize;

use crate::models::Task;

// Cost proxy for one hour of effort, used as the ROI denominator.
pub const HOURLY_COST: f64 = 50.0;

// Per-task qualitative marker derived from ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceBand {
    High,
    Solid,
    Low,
}

// Overall grade derived from average ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceGrade {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

// Task plus its derived fields. Never stored; recomputed from the task's
// own revenue / timeTaken / status whenever it is read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedTask {
    #[serde(flatten)]
    pub task: Task,
    pub roi: f64,
    pub revenue_per_hour: f64,
    pub done_hours: f64, // time-efficiency contribution: timeTaken iff Done
    pub band: PerformanceBand,
}

// Aggregate metrics over the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_revenue: f64,
    pub total_time_taken: f64,
    pub time_efficiency_pct: f64,
    pub revenue_per_hour: f64,
    pub average_roi: f64,
    pub performance_grade: PerformanceGrade,
}

impl Default for Metrics {
    // Fixed zero default for the empty collection. Returned instead of ever
    // dividing by an empty sum.
    fn default() -> Self {
        Metrics {
            total_revenue: 0.0,
            total_time_taken: 0.0,
            time_efficiency_pct: 0.0,
            revenue_per_hour: 0.0,
            average_roi: 0.0,
            performance_grade: PerformanceGrade::NeedsImprovement,
        }
    }
}

// ROI of a single task: revenue relative to the effort cost proxy.
// timeTaken carries the duration floor, so the denominator is never zero.
fn task_roi(task: &Task) -> f64 {
    task.revenue / (task.time_taken * HOURLY_COST)
}

fn band_for_roi(roi: f64) -> PerformanceBand {
    if roi >= 2.0 {
        PerformanceBand::High
    } else if roi >= 1.0 {
        PerformanceBand::Solid
    } else {
        PerformanceBand::Low
    }
}

pub fn with_derived(task: &Task) -> DerivedTask {
    let roi = task_roi(task);
    DerivedTask {
        revenue_per_hour: task.revenue / task.time_taken,
        done_hours: if task.status.is_done() {
            task.time_taken
        } else {
            0.0
        },
        band: band_for_roi(roi),
        roi,
        task: task.clone(),
    }
}

// Total display order:
// 1) ROI descending
// 2) tie -> createdAt descending (newest first)
// 3) tie -> id ascending, so the order is fully deterministic
pub fn sort_tasks(mut derived: Vec<DerivedTask>) -> Vec<DerivedTask> {
    derived.sort_by(|a, b| {
        b.roi
            .total_cmp(&a.roi)
            .then_with(|| b.task.created_at.cmp(&a.task.created_at))
            .then_with(|| a.task.id.cmp(&b.task.id))
    });
    derived
}

pub fn compute_total_revenue(tasks: &[Task]) -> f64 {
    tasks.iter().map(|t| t.revenue).sum()
}

pub fn compute_total_time(tasks: &[Task]) -> f64 {
    tasks.iter().map(|t| t.time_taken).sum()
}

// Share of total hours spent on Done tasks, as a percentage.
pub fn compute_time_efficiency(tasks: &[Task]) -> f64 {
    let total = compute_total_time(tasks);
    if total <= 0.0 {
        return 0.0;
    }
    let done: f64 = tasks
        .iter()
        .filter(|t| t.status.is_done())
        .map(|t| t.time_taken)
        .sum();
    100.0 * done / total
}

pub fn compute_revenue_per_hour(tasks: &[Task]) -> f64 {
    let total_time = compute_total_time(tasks);
    if total_time <= 0.0 {
        return 0.0;
    }
    compute_total_revenue(tasks) / total_time
}

pub fn compute_average_roi(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    tasks.iter().map(task_roi).sum::<f64>() / tasks.len() as f64
}

// Grade thresholds partition the whole line, so every average maps to
// exactly one grade:
//   (-inf, 1.0) -> Needs Improvement
//   [1.0, 1.5)  -> Average
//   [1.5, 2.0)  -> Good
//   [2.0, +inf) -> Excellent
pub fn compute_performance_grade(average_roi: f64) -> PerformanceGrade {
    if average_roi >= 2.0 {
        PerformanceGrade::Excellent
    } else if average_roi >= 1.5 {
        PerformanceGrade::Good
    } else if average_roi >= 1.0 {
        PerformanceGrade::Average
    } else {
        PerformanceGrade::NeedsImprovement
    }
}

pub fn compute_metrics(tasks: &[Task]) -> Metrics {
    if tasks.is_empty() {
        return Metrics::default();
    }

    let average_roi = compute_average_roi(tasks);
    Metrics {
        total_revenue: compute_total_revenue(tasks),
        total_time_taken: compute_total_time(tasks),
        time_efficiency_pct: compute_time_efficiency(tasks),
        revenue_per_hour: compute_revenue_per_hour(tasks),
        average_roi,
        performance_grade: compute_performance_grade(average_roi),
    }
}
