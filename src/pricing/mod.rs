//! Discretized revenue optimization.
//!
//! Elasticity can make revenue non-monotonic in price, so the optimizer scans
//! a small fixed grid instead of solving for the optimum in closed form.

use serde::{Deserialize, Serialize};

use crate::demand::DemandEstimate;
use crate::network::RouteType;

pub const REFERENCE_PRICE: f64 = 20_000.0;
pub const PRICE_STEP: u32 = 1_000;
pub const MIN_DEMAND: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub fn for_route(route_type: RouteType, flight_minutes: u32) -> Self {
        let (min, max) = match route_type {
            RouteType::Domestic => (10_000, 30_000),
            RouteType::International if flight_minutes <= 120 => (15_000, 35_000),
            RouteType::International if flight_minutes <= 240 => (20_000, 45_000),
            RouteType::International => (25_000, 50_000),
        };
        Self { min, max }
    }

    /// Grid prices in ascending order. The grid runs one step past `max`.
    pub fn grid(&self) -> impl Iterator<Item = u32> {
        (self.min..=self.max + PRICE_STEP).step_by(PRICE_STEP as usize)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptimalPricingResult {
    pub price: u32,
    pub demand: u32,
    pub revenue: u64,
}

pub fn demand_at_price(baseline: u32, elasticity: f64, price: u32) -> u32 {
    let raw = f64::from(baseline) * (f64::from(price) / REFERENCE_PRICE).powf(elasticity);
    let floored = if raw.is_finite() { raw.max(0.0).floor() } else { 0.0 };
    (floored as u32).max(MIN_DEMAND)
}

pub fn optimize(
    estimate: &DemandEstimate,
    route_type: RouteType,
    flight_minutes: u32,
) -> OptimalPricingResult {
    let range = PriceRange::for_route(route_type, flight_minutes);
    optimize_over(estimate, range)
}

pub fn optimize_over(estimate: &DemandEstimate, range: PriceRange) -> OptimalPricingResult {
    let mut best: Option<OptimalPricingResult> = None;
    for price in range.grid() {
        let demand = demand_at_price(estimate.baseline, estimate.elasticity, price);
        let revenue = u64::from(price) * u64::from(demand);
        // strict comparison keeps the lowest price on ties
        if best.map_or(true, |b| revenue > b.revenue) {
            best = Some(OptimalPricingResult {
                price,
                demand,
                revenue,
            });
        }
    }
    best.unwrap_or(OptimalPricingResult {
        price: range.min,
        demand: MIN_DEMAND,
        revenue: u64::from(range.min) * u64::from(MIN_DEMAND),
    })
}
