use chrono::{Duration, TimeZone, Utc};
use sales_tracker::logic::{
    compute_average_roi, compute_metrics, compute_performance_grade, compute_revenue_per_hour,
    compute_time_efficiency, compute_total_revenue, compute_total_time, sort_tasks, with_derived,
    Metrics, PerformanceBand, PerformanceGrade, HOURLY_COST,
};
use sales_tracker::models::{Task, TaskPriority, TaskStatus};
use sales_tracker::seed::generate_sales_tasks;

fn task(id: &str, revenue: f64, time_taken: f64, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {id}"),
        revenue,
        time_taken,
        priority: TaskPriority::Medium,
        status,
        notes: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        completed_at: None,
    }
}

#[test]
fn empty_collection_yields_fixed_zero_default() {
    let metrics = compute_metrics(&[]);
    assert_eq!(metrics, Metrics::default());
    assert_eq!(metrics.performance_grade, PerformanceGrade::NeedsImprovement);

    // every aggregate individually, and none of them NaN/inf
    assert_eq!(compute_total_revenue(&[]), 0.0);
    assert_eq!(compute_total_time(&[]), 0.0);
    assert_eq!(compute_time_efficiency(&[]), 0.0);
    assert_eq!(compute_revenue_per_hour(&[]), 0.0);
    assert_eq!(compute_average_roi(&[]), 0.0);
    assert!(metrics.revenue_per_hour.is_finite());
    assert!(metrics.average_roi.is_finite());
}

#[test]
fn totals_and_revenue_per_hour() {
    let tasks = vec![
        task("a", 100.0, 10.0, TaskStatus::Todo),
        task("b", 200.0, 10.0, TaskStatus::Todo),
    ];

    assert_eq!(compute_total_revenue(&tasks), 300.0);
    assert_eq!(compute_total_time(&tasks), 20.0);
    assert_eq!(compute_revenue_per_hour(&tasks), 15.0);
}

#[test]
fn time_efficiency_is_done_share_of_hours() {
    let tasks = vec![
        task("a", 0.0, 10.0, TaskStatus::Done),
        task("b", 0.0, 10.0, TaskStatus::Todo),
    ];
    assert_eq!(compute_time_efficiency(&tasks), 50.0);

    let none_done = vec![task("a", 0.0, 4.0, TaskStatus::Todo)];
    assert_eq!(compute_time_efficiency(&none_done), 0.0);
}

#[test]
fn average_roi_is_mean_of_per_task_roi() {
    // roi = revenue / (timeTaken * HOURLY_COST)
    let tasks = vec![
        task("a", 100.0 * HOURLY_COST, 100.0, TaskStatus::Todo), // roi 1.0
        task("b", 30.0 * HOURLY_COST, 10.0, TaskStatus::Todo),   // roi 3.0
    ];
    assert_eq!(compute_average_roi(&tasks), 2.0);
}

#[test]
fn grade_thresholds_partition_the_line() {
    assert_eq!(
        compute_performance_grade(-1.0),
        PerformanceGrade::NeedsImprovement
    );
    assert_eq!(
        compute_performance_grade(0.99),
        PerformanceGrade::NeedsImprovement
    );
    assert_eq!(compute_performance_grade(1.0), PerformanceGrade::Average);
    assert_eq!(compute_performance_grade(1.49), PerformanceGrade::Average);
    assert_eq!(compute_performance_grade(1.5), PerformanceGrade::Good);
    assert_eq!(compute_performance_grade(1.99), PerformanceGrade::Good);
    assert_eq!(compute_performance_grade(2.0), PerformanceGrade::Excellent);
    assert_eq!(compute_performance_grade(100.0), PerformanceGrade::Excellent);
}

#[test]
fn grade_serializes_with_spaces() {
    let v = serde_json::to_value(PerformanceGrade::NeedsImprovement).unwrap();
    assert_eq!(v, "Needs Improvement");
}

#[test]
fn with_derived_computes_per_task_fields() {
    let done = with_derived(&task("a", 400.0, 2.0, TaskStatus::Done));
    assert_eq!(done.roi, 400.0 / (2.0 * HOURLY_COST));
    assert_eq!(done.revenue_per_hour, 200.0);
    assert_eq!(done.done_hours, 2.0);
    assert_eq!(done.band, PerformanceBand::High);

    let open = with_derived(&task("b", 75.0, 3.0, TaskStatus::InProgress));
    assert_eq!(open.done_hours, 0.0);
    assert_eq!(open.band, PerformanceBand::Low);

    let solid = with_derived(&task("c", 60.0 * HOURLY_COST, 60.0, TaskStatus::Todo));
    assert_eq!(solid.band, PerformanceBand::Solid);
}

#[test]
fn sort_orders_by_roi_then_created_at_then_id() {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut low = task("low", 50.0, 1.0, TaskStatus::Todo);
    low.created_at = base;
    let mut high = task("high", 500.0, 1.0, TaskStatus::Todo);
    high.created_at = base;

    // same roi as `high`, older createdAt
    let mut high_old = task("high-old", 500.0, 1.0, TaskStatus::Todo);
    high_old.created_at = base - Duration::days(3);

    // identical roi and createdAt as `high`: id breaks the tie
    let mut high_b = task("high-b", 500.0, 1.0, TaskStatus::Todo);
    high_b.created_at = base;

    let sorted = sort_tasks(
        [&low, &high_old, &high_b, &high]
            .into_iter()
            .map(with_derived)
            .collect(),
    );

    let ids: Vec<&str> = sorted.iter().map(|d| d.task.id.as_str()).collect();
    assert_eq!(ids, ["high", "high-b", "high-old", "low"]);
}

#[test]
fn sort_is_deterministic_across_input_orders() {
    let tasks: Vec<Task> = generate_sales_tasks(20, Utc::now());

    let forward = sort_tasks(tasks.iter().map(with_derived).collect());
    let backward = sort_tasks(tasks.iter().rev().map(with_derived).collect());
    assert_eq!(forward, backward);
}

#[test]
fn metrics_assemble_from_reductions() {
    let tasks = vec![
        task("a", 100.0, 10.0, TaskStatus::Done),
        task("b", 200.0, 10.0, TaskStatus::Todo),
    ];
    let metrics = compute_metrics(&tasks);

    assert_eq!(metrics.total_revenue, 300.0);
    assert_eq!(metrics.total_time_taken, 20.0);
    assert_eq!(metrics.time_efficiency_pct, 50.0);
    assert_eq!(metrics.revenue_per_hour, 15.0);
    assert_eq!(metrics.average_roi, compute_average_roi(&tasks));
    assert_eq!(
        metrics.performance_grade,
        compute_performance_grade(metrics.average_roi)
    );
}

#[test]
fn seed_tasks_are_well_formed() {
    let now = Utc::now();
    let tasks = generate_sales_tasks(50, now);

    assert_eq!(tasks.len(), 50);
    for t in &tasks {
        assert!(t.time_taken >= 1.0);
        assert!(t.revenue >= 0.0);
        assert!(t.created_at < now);
        assert_eq!(t.completed_at.is_some(), t.status.is_done());
    }

    // deterministic for a fixed `now`
    assert_eq!(tasks, generate_sales_tasks(50, now));
}
