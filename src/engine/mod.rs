pub mod batch;
pub mod schedule;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airline::loader::AirlineFile;
use crate::airline::{AirlineProfile, InternalResourceData, OperationScale};
use crate::demand::estimate_demand;
use crate::error::ConfigError;
use crate::geo::time::DepartureTime;
use crate::geo::FlightTimeCache;
use crate::network::{CandidateSlot, Dataset, Route, RouteType};
use crate::pricing::optimize;
use crate::priority::hashing::{stable_hash, unit_factor};
use crate::priority::{score_breakdown, PriorityInputs};
use crate::scale::assign_scale;

pub use batch::evaluate_month;
pub use schedule::MonthSchedule;

/// One evaluated departure candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub route: Route,
    pub departure_time: DepartureTime,
    pub flight_minutes: u32,
    pub recommended_max_operations: u32,
    pub price: u32,
    pub demand: u32,
    pub revenue: u64,
    pub scale: OperationScale,
    pub seats: u32,
    pub min_viable_revenue: u64,
    pub captains: u32,
    pub first_officers: u32,
    pub personnel_index: u32,
    pub turnaround_pre: u32,
    pub turnaround_post: u32,
    pub priority_score: f64,
    pub dataset: Dataset,
}

/// Runs the demand, pricing, scale and priority stages for single slots.
/// Shared across batch workers behind an `Arc`.
#[derive(Debug)]
pub struct CandidateEvaluator {
    profile: AirlineProfile,
    resources: InternalResourceData,
    flight_times: FlightTimeCache,
    seed: u64,
    debug_sample_rate: f64,
}

impl CandidateEvaluator {
    pub fn new(airline: AirlineFile, seed: u64) -> Self {
        Self {
            profile: airline.profile,
            resources: airline.resources,
            flight_times: FlightTimeCache::new(),
            seed,
            debug_sample_rate: 0.0,
        }
    }

    pub fn with_debug_sample_rate(mut self, rate: f64) -> Self {
        self.debug_sample_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn flight_times(&self) -> &FlightTimeCache {
        &self.flight_times
    }

    /// RNG for one route-day. Derived from the run seed only, so results do
    /// not depend on which worker evaluates the route.
    pub fn day_rng(&self, route: &Route, date: NaiveDate) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(stable_hash(&format!(
            "{}_{}_{}_{}",
            self.seed, route.departure, route.arrival, date
        )))
    }

    pub fn recommended_max_operations(&self, route: &Route) -> u32 {
        let mut rng = ChaCha8Rng::seed_from_u64(stable_hash(&format!(
            "{}_{}_{}_operations",
            self.seed, route.departure, route.arrival
        )));
        match route.route_type {
            RouteType::International => rng.gen_range(3..8),
            RouteType::Domestic => rng.gen_range(5..12),
        }
    }

    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        slot: &CandidateSlot<'_>,
        rng: &mut R,
    ) -> Result<CandidateRecord, ConfigError> {
        let max_operations = self.recommended_max_operations(slot.route);
        self.evaluate_with(slot, max_operations, rng)
    }

    /// All candidates of one route for the schedule, in date then time order.
    pub fn evaluate_route(
        &self,
        route: &Route,
        schedule: &MonthSchedule,
    ) -> Result<Vec<CandidateRecord>, ConfigError> {
        let max_operations = self.recommended_max_operations(route);
        let mut records = Vec::with_capacity(schedule.candidate_count_per_route());
        for date in schedule.dates() {
            let mut rng = self.day_rng(route, date);
            for &departure_time in &schedule.departures {
                let slot = CandidateSlot {
                    route,
                    date,
                    departure_time,
                };
                records.push(self.evaluate_with(&slot, max_operations, &mut rng)?);
            }
        }
        debug!(
            route = %route.label(),
            candidates = records.len(),
            max_operations,
            "route evaluated"
        );
        Ok(records)
    }

    fn evaluate_with<R: Rng + ?Sized>(
        &self,
        slot: &CandidateSlot<'_>,
        recommended_max_operations: u32,
        rng: &mut R,
    ) -> Result<CandidateRecord, ConfigError> {
        let route = slot.route;
        let flight_minutes = self
            .flight_times
            .flight_time(&route.departure, &route.arrival);
        let estimate = estimate_demand(&self.profile, route.route_type, slot.departure_time, rng);
        let pricing = optimize(&estimate, route.route_type, flight_minutes);
        let assignment = assign_scale(pricing.demand, &self.profile, &self.resources)?;
        let breakdown = score_breakdown(&PriorityInputs {
            revenue: pricing.revenue,
            assignment: &assignment,
            route_type: route.route_type,
            departure: slot.departure_time,
            profile: &self.profile,
            route,
        });

        if self.is_sampled(slot) {
            debug!(
                route = %route.label(),
                date = %slot.date,
                time = %slot.departure_time,
                baseline = estimate.baseline,
                price = pricing.price,
                demand = pricing.demand,
                revenue = pricing.revenue,
                scale = %assignment.scale,
                efficiency = breakdown.efficiency,
                uniqueness = breakdown.uniqueness,
                weighted_sum = breakdown.weighted_sum,
                score = breakdown.score,
                "sampled candidate"
            );
        }

        Ok(CandidateRecord {
            date: slot.date,
            route: route.clone(),
            departure_time: slot.departure_time,
            flight_minutes,
            recommended_max_operations,
            price: pricing.price,
            demand: pricing.demand,
            revenue: pricing.revenue,
            scale: assignment.scale,
            seats: assignment.seats,
            min_viable_revenue: assignment.min_viable_revenue,
            captains: assignment.crew.captains,
            first_officers: assignment.crew.first_officers,
            personnel_index: assignment.personnel_index,
            turnaround_pre: assignment.turnaround_pre,
            turnaround_post: assignment.turnaround_post,
            priority_score: breakdown.score,
            dataset: Dataset::for_route(route),
        })
    }

    fn is_sampled(&self, slot: &CandidateSlot<'_>) -> bool {
        if self.debug_sample_rate <= 0.0 {
            return false;
        }
        let key = format!(
            "{}_{}_{}_{}_trace",
            slot.route.departure, slot.route.arrival, slot.date, slot.departure_time
        );
        unit_factor(stable_hash(&key)) < self.debug_sample_rate
    }
}
