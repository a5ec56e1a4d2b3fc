use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tracing::info;

use crate::engine::{CandidateEvaluator, CandidateRecord, MonthSchedule};
use crate::network::Route;

/// Evaluates every route for the schedule, one blocking task per route.
/// Output order is independent of task completion order.
pub async fn evaluate_month(
    evaluator: Arc<CandidateEvaluator>,
    routes: &[Route],
    schedule: &MonthSchedule,
) -> Result<Vec<CandidateRecord>> {
    let started = Instant::now();
    info!(
        routes = routes.len(),
        year = schedule.year,
        month = schedule.month,
        per_route = schedule.candidate_count_per_route(),
        "evaluating month"
    );

    let mut tasks = JoinSet::new();
    for route in routes.iter().cloned() {
        let evaluator = Arc::clone(&evaluator);
        let schedule = schedule.clone();
        tasks.spawn_blocking(move || evaluator.evaluate_route(&route, &schedule));
    }

    let mut records = Vec::with_capacity(routes.len() * schedule.candidate_count_per_route());
    while let Some(joined) = tasks.join_next().await {
        let route_records = joined.context("route evaluation task failed")??;
        records.extend(route_records);
    }
    sort_records(&mut records);

    info!(
        candidates = records.len(),
        cached_flight_times = evaluator.flight_times().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "month evaluated"
    );
    Ok(records)
}

pub fn sort_records(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.route.departure.cmp(&b.route.departure))
            .then_with(|| a.route.arrival.cmp(&b.route.arrival))
            .then_with(|| a.departure_time.cmp(&b.departure_time))
    });
}

/// Highest priority first; ties keep the deterministic batch order.
pub fn rank_by_priority(records: &mut [CandidateRecord]) {
    records.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
}
