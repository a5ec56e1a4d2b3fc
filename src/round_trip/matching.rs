use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::CandidateRecord;
use crate::geo::time::DepartureTime;
use crate::network::Dataset;
use crate::round_trip::{score_round_trip, InboundLeg, OutboundLeg, RoundTripScore};
use crate::weights::AirlineWeights;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundTripRecord {
    pub outbound_date: NaiveDate,
    pub outbound_departure: String,
    pub outbound_arrival: String,
    pub outbound_time: DepartureTime,
    pub outbound_priority: f64,
    pub inbound_date: NaiveDate,
    pub inbound_time: DepartureTime,
    pub inbound_priority: f64,
    #[serde(flatten)]
    pub score: RoundTripScore,
}

impl From<&CandidateRecord> for OutboundLeg {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            date: record.date,
            departure: record.departure_time,
            flight_minutes: record.flight_minutes,
            post_flight_turnaround: record.turnaround_post,
            priority_score: record.priority_score,
        }
    }
}

impl From<&CandidateRecord> for InboundLeg {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            date: record.date,
            departure: record.departure_time,
            pre_flight_turnaround: record.turnaround_pre,
            priority_score: record.priority_score,
        }
    }
}

/// A scored pair that still borrows both legs. Ordered so the best-ranked
/// pair is the least, which lets a max-heap evict the worst survivor.
struct RankedPair<'a> {
    outbound: &'a CandidateRecord,
    inbound: &'a CandidateRecord,
    score: RoundTripScore,
}

impl RankedPair<'_> {
    fn into_record(self) -> RoundTripRecord {
        RoundTripRecord {
            outbound_date: self.outbound.date,
            outbound_departure: self.outbound.route.departure.clone(),
            outbound_arrival: self.outbound.route.arrival.clone(),
            outbound_time: self.outbound.departure_time,
            outbound_priority: self.outbound.priority_score,
            inbound_date: self.inbound.date,
            inbound_time: self.inbound.departure_time,
            inbound_priority: self.inbound.priority_score,
            score: self.score,
        }
    }
}

impl Ord for RankedPair<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .score
            .cmp(&self.score.score)
            .then_with(|| other.score.combined_priority.total_cmp(&self.score.combined_priority))
            .then_with(|| self.outbound.date.cmp(&other.outbound.date))
            .then_with(|| self.outbound.departure_time.cmp(&other.outbound.departure_time))
            .then_with(|| self.inbound.date.cmp(&other.inbound.date))
            .then_with(|| self.inbound.departure_time.cmp(&other.inbound.departure_time))
            .then_with(|| self.outbound.route.departure.cmp(&other.outbound.route.departure))
            .then_with(|| self.outbound.route.arrival.cmp(&other.outbound.route.arrival))
    }
}

impl PartialOrd for RankedPair<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankedPair<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedPair<'_> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub max_day_offset: u32,
    pub feasible_only: bool,
    /// Number of best pairs kept.
    pub limit: usize,
}

/// Pairs each Japan-departing or domestic candidate with the candidates on the
/// reversed route dated 0..=`max_day_offset` days later and returns the best
/// `limit` pairs, best score first.
///
/// International arrival legs only serve as inbound legs and international
/// departure legs only as outbound legs. Only the surviving pairs are
/// materialized, so memory stays bounded by `limit`.
pub fn match_round_trips(
    records: &[CandidateRecord],
    weights: &AirlineWeights,
    options: MatchOptions,
) -> Vec<RoundTripRecord> {
    if options.limit == 0 {
        return Vec::new();
    }

    let mut by_route: HashMap<(&str, &str), Vec<&CandidateRecord>> = HashMap::new();
    for record in records {
        if record.dataset == Dataset::InternationalDeparture {
            continue;
        }
        by_route
            .entry((record.route.departure.as_str(), record.route.arrival.as_str()))
            .or_default()
            .push(record);
    }

    let mut best: BinaryHeap<RankedPair<'_>> = BinaryHeap::new();
    let mut scored = 0usize;
    for outbound in records {
        if outbound.dataset == Dataset::InternationalArrival {
            continue;
        }
        let reverse_key = (outbound.route.arrival.as_str(), outbound.route.departure.as_str());
        let Some(inbounds) = by_route.get(&reverse_key) else {
            continue;
        };
        let out_leg = OutboundLeg::from(outbound);
        for &inbound in inbounds {
            let offset = inbound.date.signed_duration_since(outbound.date).num_days();
            if offset < 0 || offset > i64::from(options.max_day_offset) {
                continue;
            }
            let score = score_round_trip(&out_leg, &InboundLeg::from(inbound), weights);
            if options.feasible_only && !score.is_feasible() {
                continue;
            }
            scored += 1;
            best.push(RankedPair {
                outbound,
                inbound,
                score,
            });
            if best.len() > options.limit {
                best.pop();
            }
        }
    }

    let pairs: Vec<RoundTripRecord> = best
        .into_sorted_vec()
        .into_iter()
        .map(RankedPair::into_record)
        .collect();
    debug!(
        scored,
        kept = pairs.len(),
        max_day_offset = options.max_day_offset,
        feasible_only = options.feasible_only,
        "round trips matched"
    );
    pairs
}
