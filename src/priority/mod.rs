//! Composite priority index for a candidate slot.
//!
//! Seven components (efficiency, route type, time of day, brand, revenue
//! scale, resource harmony, uniqueness) are blended with fixed weights and
//! squashed through `tanh` into [15, 100]. A hash-derived micro adjustment on
//! the order of 1e-2 and below splits the ties that remain across a month of
//! candidates. Everything is deterministic in the inputs.

pub mod components;
pub mod hashing;

use serde::{Deserialize, Serialize};

use crate::airline::AirlineProfile;
use crate::geo::time::DepartureTime;
use crate::network::{Route, RouteType};
use crate::scale::OperationScaleAssignment;

use self::components::{
    brand_score, efficiency, resource_harmony, revenue_bonus, route_seed, route_type_score,
    time_of_day_score, uniqueness, weighted_resources,
};
use self::hashing::SlotHashes;

/// Golden ratio, Euler–Mascheroni, √2, ln 2, √3, 1/e, ln 10.
pub const COMPONENT_WEIGHTS: [f64; 7] = [
    1.618033, 0.577215, 1.414213, 0.693147, 1.732050, 0.367879, 2.302585,
];
pub const SCORE_DECIMALS: i32 = 7;

#[derive(Debug, Clone, Copy)]
pub struct PriorityInputs<'a> {
    pub revenue: u64,
    pub assignment: &'a OperationScaleAssignment,
    pub route_type: RouteType,
    pub departure: DepartureTime,
    pub profile: &'a AirlineProfile,
    pub route: &'a Route,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriorityBreakdown {
    pub efficiency: f64,
    pub route_type: f64,
    pub time_of_day: f64,
    pub brand: f64,
    pub revenue_bonus: f64,
    pub resource_harmony: f64,
    pub uniqueness: f64,
    pub weighted_sum: f64,
    pub saturated: f64,
    pub micro_adjustment: f64,
    pub score: f64,
}

impl PriorityBreakdown {
    pub fn components(&self) -> [f64; 7] {
        [
            self.efficiency,
            self.route_type,
            self.time_of_day,
            self.brand,
            self.revenue_bonus,
            self.resource_harmony,
            self.uniqueness,
        ]
    }
}

pub fn priority_score(inputs: &PriorityInputs<'_>) -> f64 {
    score_breakdown(inputs).score
}

pub fn score_breakdown(inputs: &PriorityInputs<'_>) -> PriorityBreakdown {
    let assignment = inputs.assignment;
    let revenue = inputs.revenue as f64;

    let efficiency = efficiency(revenue, weighted_resources(assignment));
    let seed = route_seed(inputs.route_type, inputs.departure, inputs.revenue);
    let route_type = route_type_score(inputs.route_type, seed, inputs.profile);
    let time_of_day = time_of_day_score(inputs.departure);
    let brand = brand_score(inputs.profile.brand_recognition);
    let revenue_bonus = revenue_bonus(inputs.revenue);
    let resource_harmony = resource_harmony(assignment);

    let hashes = slot_hashes(inputs, efficiency);
    let uniqueness = uniqueness(&hashes.factors());

    let components = [
        efficiency,
        route_type,
        time_of_day,
        brand,
        revenue_bonus,
        resource_harmony,
        uniqueness,
    ];
    let weighted_sum: f64 = components
        .iter()
        .zip(COMPONENT_WEIGHTS.iter())
        .map(|(c, w)| c * w)
        .sum();
    let saturated = (weighted_sum / 50.0).tanh() * 85.0 + 15.0;
    let micro_adjustment = hashes.micro_adjustment();
    let score = round_to(
        (saturated + micro_adjustment).clamp(0.0, 100.0),
        SCORE_DECIMALS,
    );

    PriorityBreakdown {
        efficiency,
        route_type,
        time_of_day,
        brand,
        revenue_bonus,
        resource_harmony,
        uniqueness,
        weighted_sum,
        saturated,
        micro_adjustment,
        score,
    }
}

fn slot_hashes(inputs: &PriorityInputs<'_>, efficiency: f64) -> SlotHashes {
    let assignment = inputs.assignment;
    let identity = format!(
        "{}_{}_{}_{}_{}_{}_{}_{}_{}_{}",
        inputs.revenue,
        assignment.seats,
        assignment.personnel_index,
        assignment.turnaround_total(),
        inputs.departure,
        inputs.route_type,
        inputs.route.departure,
        inputs.route.arrival,
        inputs.profile.brand_recognition,
        efficiency,
    );
    let resource_product = inputs
        .revenue
        .saturating_mul(u64::from(assignment.seats))
        .saturating_mul(u64::from(assignment.personnel_index));
    SlotHashes::new(&identity, resource_product)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airline::{InternalResourceData, OperationScale};
    use crate::network::Direction;
    use crate::scale::assign_scale;

    fn route(dep: &str, arr: &str) -> Route {
        Route {
            departure: dep.to_string(),
            arrival: arr.to_string(),
            departure_country: "日本".to_string(),
            arrival_country: "韓国".to_string(),
            route_type: RouteType::International,
            direction: Direction::Departure,
        }
    }

    fn score_for(route: &Route, revenue: u64, demand: u32, time: &str) -> PriorityBreakdown {
        let profile = AirlineProfile::sample();
        let resources = InternalResourceData::sample();
        let assignment = assign_scale(demand, &profile, &resources).expect("assignment");
        score_breakdown(&PriorityInputs {
            revenue,
            assignment: &assignment,
            route_type: route.route_type,
            departure: time.parse().expect("time"),
            profile: &profile,
            route,
        })
    }

    #[test]
    fn score_is_bounded_and_rounded() {
        let r = route("HND", "ICN");
        let cases = [
            (100_000, 10),
            (2_000_000, 100),
            (9_000_000, 320),
            (60_000_000, 900),
        ];
        for (revenue, demand) in cases {
            for time in ["07:00", "08:30", "13:00", "22:30"] {
                let breakdown = score_for(&r, revenue, demand, time);
                assert!((0.0..=100.0).contains(&breakdown.score));
                assert_eq!(round_to(breakdown.score, SCORE_DECIMALS), breakdown.score);
                assert!(breakdown.components().iter().all(|c| c.is_finite()));
            }
        }
    }

    #[test]
    fn score_is_deterministic() {
        let r = route("HND", "ICN");
        let a = score_for(&r, 3_542_000, 77, "09:00");
        let b = score_for(&r, 3_542_000, 77, "09:00");
        assert_eq!(a, b);
    }

    #[test]
    fn departure_airport_changes_the_score() {
        let from_haneda = score_for(&route("HND", "ICN"), 3_542_000, 77, "09:00");
        let from_narita = score_for(&route("NRT", "ICN"), 3_542_000, 77, "09:00");
        assert_ne!(from_haneda.score, from_narita.score);
        assert_ne!(from_haneda.uniqueness, from_narita.uniqueness);
        // only the hash-driven terms depend on the airport
        assert_eq!(from_haneda.efficiency, from_narita.efficiency);
        assert_eq!(from_haneda.time_of_day, from_narita.time_of_day);
    }

    #[test]
    fn scores_rarely_collide_across_a_day() {
        let profile = AirlineProfile::sample();
        let resources = InternalResourceData::sample();
        let mut scores = Vec::new();
        for (dep, arr) in [("HND", "ICN"), ("NRT", "ICN"), ("KIX", "TPE"), ("FUK", "PUS")] {
            let r = route(dep, arr);
            for minutes in (420..=1350).step_by(30) {
                let assignment = assign_scale(120, &profile, &resources).expect("assignment");
                scores.push(priority_score(&PriorityInputs {
                    revenue: 3_000_000,
                    assignment: &assignment,
                    route_type: RouteType::International,
                    departure: DepartureTime::from_minutes(minutes),
                    profile: &profile,
                    route: &r,
                }));
            }
        }
        let total = scores.len();
        scores.sort_by(|a, b| a.total_cmp(b));
        scores.dedup();
        assert_eq!(scores.len(), total);
    }

    #[test]
    fn score_is_saturated_sum_plus_micro_adjustment() {
        let breakdown = score_for(&route("HND", "SIN"), 100_000, 10, "07:00");
        let expected = (breakdown.weighted_sum / 50.0).tanh() * 85.0 + 15.0;
        assert_eq!(breakdown.saturated, expected);
        assert!(breakdown.saturated < 100.0);
        assert_eq!(
            breakdown.score,
            round_to((breakdown.saturated + breakdown.micro_adjustment).clamp(0.0, 100.0), 7)
        );
    }

    #[test]
    fn large_scale_assignment_is_scored() {
        let breakdown = score_for(&route("HND", "ICN"), 12_000_000, 350, "18:00");
        assert!(breakdown.revenue_bonus > 7.8);
        assert_eq!(
            assign_scale(350, &AirlineProfile::sample(), &InternalResourceData::sample())
                .map(|a| a.scale),
            Ok(OperationScale::Large)
        );
    }
}
