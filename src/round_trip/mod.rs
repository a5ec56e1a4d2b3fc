pub mod matching;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::time::{DepartureTime, MINUTES_PER_DAY};
use crate::weights::AirlineWeights;

pub use matching::{match_round_trips, MatchOptions, RoundTripRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutboundLeg {
    pub date: NaiveDate,
    pub departure: DepartureTime,
    pub flight_minutes: u32,
    pub post_flight_turnaround: u32,
    pub priority_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InboundLeg {
    pub date: NaiveDate,
    pub departure: DepartureTime,
    pub pre_flight_turnaround: u32,
    pub priority_score: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoundTripScore {
    pub score: u32,
    /// Negative when the inbound leg must be ready before the aircraft and
    /// crew are free; reported, not rejected.
    pub gap_hours: f64,
    pub resource_waste_score: f64,
    pub combined_priority: f64,
}

impl RoundTripScore {
    pub fn is_feasible(&self) -> bool {
        self.gap_hours >= 0.0
    }
}

pub fn gap_minutes(outbound: &OutboundLeg, inbound: &InboundLeg) -> i64 {
    let available = i64::from(outbound.departure.minutes())
        + i64::from(outbound.flight_minutes)
        + i64::from(outbound.post_flight_turnaround);
    let required =
        i64::from(inbound.departure.minutes()) - i64::from(inbound.pre_flight_turnaround);
    let day_offset = inbound.date.signed_duration_since(outbound.date).num_days();
    day_offset * i64::from(MINUTES_PER_DAY) + required - available
}

pub fn resource_waste_score(gap_hours: f64) -> f64 {
    if gap_hours <= 4.0 {
        1.0
    } else if gap_hours <= 8.0 {
        0.8
    } else if gap_hours <= 16.0 {
        0.5
    } else {
        0.2
    }
}

pub fn score_round_trip(
    outbound: &OutboundLeg,
    inbound: &InboundLeg,
    weights: &AirlineWeights,
) -> RoundTripScore {
    let gap_hours = gap_minutes(outbound, inbound) as f64 / 60.0;
    let resource_waste_score = resource_waste_score(gap_hours);
    let combined_priority =
        (outbound.priority_score / 100.0 + inbound.priority_score / 100.0) / 2.0;
    let blended =
        weights.priority_weight * combined_priority + weights.waste_weight * resource_waste_score;
    RoundTripScore {
        score: (blended * 100.0).round().max(0.0) as u32,
        gap_hours,
        resource_waste_score,
        combined_priority,
    }
}
