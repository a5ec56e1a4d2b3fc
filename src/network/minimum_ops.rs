//! Monthly minimum operation counts per route.
//!
//! Each route gets a popularity score (distance tier, route type, business
//! bonus, brand and demand) and a strategic weight from the airline's focus.
//! Together they pick an operations band, and the monthly minimum is drawn
//! uniformly from that band with the route's own seeded RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::airline::AirlineProfile;
use crate::network::{airports, Dataset, Route, RouteType};
use crate::priority::hashing::stable_hash;

/// Popularity used when a pair is in neither tier table.
pub const DEFAULT_DISTANCE_POPULARITY: f64 = 0.6;
pub const BUSINESS_ROUTE_BONUS: f64 = 0.2;
const SMALL_CARRIER_DOMESTIC_CAP: u32 = 18;

const DOMESTIC_TIERS: &[(&str, &str, f64)] = &[
    ("HND", "KIX", 0.95),
    ("HND", "NGO", 0.90),
    ("HND", "FUK", 0.85),
    ("KIX", "NGO", 0.80),
    ("KIX", "FUK", 0.75),
    ("NGO", "FUK", 0.70),
    ("CTS", "OKA", 0.65),
];

const INTERNATIONAL_TIERS: &[(&str, &str, f64)] = &[
    ("HND", "PUS", 0.95),
    ("HND", "ICN", 0.95),
    ("HND", "TPE", 0.90),
    ("HND", "PKX", 0.85),
    ("KIX", "PUS", 0.85),
    ("KIX", "ICN", 0.85),
    ("KIX", "TPE", 0.80),
    ("KIX", "PKX", 0.75),
    ("FUK", "PUS", 0.90),
    ("FUK", "ICN", 0.90),
    ("FUK", "TPE", 0.85),
    ("FUK", "PKX", 0.70),
];

const BUSINESS_ROUTES: &[(&str, &str)] = &[
    ("HND", "KIX"),
    ("HND", "NGO"),
    ("HND", "PUS"),
    ("HND", "ICN"),
    ("KIX", "PUS"),
    ("KIX", "ICN"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimumOperations {
    #[serde(flatten)]
    pub route: Route,
    pub popularity: f64,
    pub strategic_weight: f64,
    pub band: OperationsBand,
    pub monthly_minimum: u32,
}

/// Inclusive range the monthly minimum is drawn from. `min <= max` always.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationsBand {
    pub min: u32,
    pub max: u32,
}

impl OperationsBand {
    fn raise_min(&mut self, by: u32) {
        self.min = (self.min + by).min(self.max);
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

// Routes may name airports by code or by display name.
fn airport_code(key: &str) -> &str {
    airports::lookup(key).map_or(key.trim(), |a| a.code)
}

fn same_pair(dep: &str, arr: &str, a: &str, b: &str) -> bool {
    (dep == a && arr == b) || (dep == b && arr == a)
}

/// Tier popularity for an airport pair in either direction.
pub fn distance_popularity(departure: &str, arrival: &str) -> f64 {
    let (dep, arr) = (airport_code(departure), airport_code(arrival));
    DOMESTIC_TIERS
        .iter()
        .chain(INTERNATIONAL_TIERS)
        .find(|(a, b, _)| same_pair(dep, arr, a, b))
        .map_or(DEFAULT_DISTANCE_POPULARITY, |(_, _, popularity)| *popularity)
}

pub fn popular_route_bonus(departure: &str, arrival: &str) -> f64 {
    let (dep, arr) = (airport_code(departure), airport_code(arrival));
    if BUSINESS_ROUTES.iter().any(|(a, b)| same_pair(dep, arr, a, b)) {
        BUSINESS_ROUTE_BONUS
    } else {
        0.0
    }
}

pub fn route_popularity(route: &Route, profile: &AirlineProfile) -> f64 {
    let type_factor = match route.route_type {
        RouteType::Domestic => 0.8,
        RouteType::International => 0.6,
    };
    let demand_factor = (f64::from(profile.base_demand) / 150.0).min(1.0);
    let popularity = distance_popularity(&route.departure, &route.arrival) * 0.3
        + type_factor * 0.25
        + popular_route_bonus(&route.departure, &route.arrival) * 0.2
        + profile.brand_recognition * 0.15
        + demand_factor * 0.1;
    popularity.clamp(0.0, 1.0)
}

/// Brand plus focus, with extra weight for small carriers on domestic routes.
pub fn strategic_weight(route_type: RouteType, profile: &AirlineProfile) -> f64 {
    let brand = profile.brand_recognition;
    let mut weight = brand * 0.4;
    match route_type {
        RouteType::International => weight += profile.international_focus * 0.3,
        RouteType::Domestic => {
            weight += profile.domestic_focus * 0.3;
            if brand < 0.4 {
                weight += 0.2;
            }
            if brand < 0.5 {
                weight += 0.1;
            }
        }
    }
    weight.clamp(0.0, 1.0)
}

pub fn operations_band(
    route_type: RouteType,
    popularity: f64,
    strategic_weight: f64,
    profile: &AirlineProfile,
) -> OperationsBand {
    let (brand, demand) = (profile.brand_recognition, profile.base_demand);
    let (min, max) = match route_type {
        RouteType::International if popularity > 0.9 => (6, 10),
        RouteType::International if popularity > 0.7 => (5, 8),
        RouteType::International if popularity > 0.5 => (4, 7),
        RouteType::International => (3, 6),
        RouteType::Domestic if popularity > 0.9 => (8, 15),
        RouteType::Domestic if popularity > 0.7 => (7, 12),
        RouteType::Domestic if popularity > 0.5 => (6, 10),
        RouteType::Domestic => (4, 8),
    };
    let mut band = OperationsBand { min, max };

    if strategic_weight > 0.8 {
        band.raise_min(2);
    } else if strategic_weight > 0.6 {
        band.raise_min(1);
    }

    match route_type {
        RouteType::International => {
            if (brand > 0.8 && demand > 120) || (brand > 0.6 && demand > 100) {
                band.raise_min(1);
            }
        }
        RouteType::Domestic => {
            if brand < 0.4 && popularity > 0.7 {
                band.raise_min(2);
                band.max = (band.max + 3).min(SMALL_CARRIER_DOMESTIC_CAP);
            }
            if (brand > 0.7 && demand > 100) || (brand > 0.5 && demand > 80) {
                band.raise_min(1);
            }
        }
    }
    band
}

pub fn monthly_minimum<R: Rng + ?Sized>(
    route: &Route,
    profile: &AirlineProfile,
    rng: &mut R,
) -> MinimumOperations {
    let popularity = route_popularity(route, profile);
    let strategic_weight = strategic_weight(route.route_type, profile);
    let band = operations_band(route.route_type, popularity, strategic_weight, profile);
    MinimumOperations {
        route: route.clone(),
        popularity,
        strategic_weight,
        band,
        monthly_minimum: band.sample(rng),
    }
}

/// RNG for one route's minimum, independent of table order.
pub fn minimum_rng(seed: u64, route: &Route) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stable_hash(&format!(
        "{}_{}_{}_minimum",
        seed, route.departure, route.arrival
    )))
}

/// One row per Japan-departing or domestic route. Arrival legs share the
/// minimum of their outbound counterpart and are skipped.
pub fn minimum_operations_table(
    profile: &AirlineProfile,
    routes: &[Route],
    seed: u64,
) -> Vec<MinimumOperations> {
    let rows: Vec<MinimumOperations> = routes
        .iter()
        .filter(|r| Dataset::for_route(r) != Dataset::InternationalArrival)
        .map(|r| monthly_minimum(r, profile, &mut minimum_rng(seed, r)))
        .collect();
    debug!(routes = routes.len(), rows = rows.len(), seed, "minimum operations");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::routes::sample_routes;
    use crate::network::Direction;

    fn route(dep: &str, arr: &str, route_type: RouteType, direction: Direction) -> Route {
        Route {
            departure: dep.to_string(),
            arrival: arr.to_string(),
            departure_country: String::new(),
            arrival_country: String::new(),
            route_type,
            direction,
        }
    }

    fn mid_size_profile() -> AirlineProfile {
        let mut profile = AirlineProfile::sample();
        profile.brand_recognition = 0.55;
        profile.international_focus = 0.4;
        profile.domestic_focus = 0.9;
        profile.base_demand = 85;
        profile
    }

    #[test]
    fn tier_lookup_is_symmetric_and_accepts_names() {
        assert_eq!(distance_popularity("HND", "ICN"), 0.95);
        assert_eq!(distance_popularity("ICN", "HND"), 0.95);
        assert_eq!(distance_popularity("羽田", "福岡"), 0.85);
        assert_eq!(distance_popularity("HND", "BKK"), DEFAULT_DISTANCE_POPULARITY);
        assert_eq!(popular_route_bonus("仁川", "HND"), BUSINESS_ROUTE_BONUS);
        assert_eq!(popular_route_bonus("HND", "FUK"), 0.0);
    }

    #[test]
    fn popularity_and_band_for_a_mid_size_carrier() {
        let profile = mid_size_profile();

        let intl = route("HND", "ICN", RouteType::International, Direction::Departure);
        let popularity = route_popularity(&intl, &profile);
        assert!((popularity - 0.6141667).abs() < 1e-6);
        let weight = strategic_weight(RouteType::International, &profile);
        assert!((weight - 0.34).abs() < 1e-9);
        assert_eq!(
            operations_band(RouteType::International, popularity, weight, &profile),
            OperationsBand { min: 4, max: 7 }
        );

        let dom = route("HND", "FUK", RouteType::Domestic, Direction::Both);
        let popularity = route_popularity(&dom, &profile);
        assert!((popularity - 0.5941667).abs() < 1e-6);
        let weight = strategic_weight(RouteType::Domestic, &profile);
        assert!((weight - 0.49).abs() < 1e-9);
        // mid brand with demand above 80 lifts the floor by one
        assert_eq!(
            operations_band(RouteType::Domestic, popularity, weight, &profile),
            OperationsBand { min: 7, max: 10 }
        );
    }

    #[test]
    fn small_carriers_widen_popular_domestic_bands() {
        let mut profile = mid_size_profile();
        profile.brand_recognition = 0.3;
        let weight = strategic_weight(RouteType::Domestic, &profile);
        assert!((weight - 0.69).abs() < 1e-9);
        // 7..12, +1 strategic, +2 small carrier with max raised by three
        assert_eq!(
            operations_band(RouteType::Domestic, 0.75, weight, &profile),
            OperationsBand { min: 10, max: 15 }
        );
        assert_eq!(
            operations_band(RouteType::Domestic, 0.95, 0.9, &profile),
            OperationsBand { min: 12, max: 18 }
        );
    }

    #[test]
    fn raised_floor_never_passes_the_ceiling() {
        let mut profile = AirlineProfile::sample();
        profile.base_demand = 150;
        for popularity in [0.2, 0.6, 0.8, 0.95] {
            for route_type in [RouteType::Domestic, RouteType::International] {
                let band = operations_band(route_type, popularity, 0.95, &profile);
                assert!(band.min <= band.max);
                assert!(band.max <= SMALL_CARRIER_DOMESTIC_CAP);
            }
        }
    }

    #[test]
    fn table_skips_arrival_legs_and_is_reproducible() {
        let profile = mid_size_profile();
        let routes = sample_routes();
        let table = minimum_operations_table(&profile, &routes, 7);
        let expected = routes
            .iter()
            .filter(|r| Dataset::for_route(r) != Dataset::InternationalArrival)
            .count();
        assert_eq!(table.len(), expected);
        assert!(table
            .iter()
            .all(|row| Dataset::for_route(&row.route) != Dataset::InternationalArrival));
        assert!(table
            .iter()
            .all(|row| (row.band.min..=row.band.max).contains(&row.monthly_minimum)));
        assert_eq!(table, minimum_operations_table(&profile, &routes, 7));

        let reversed: Vec<Route> = routes.iter().rev().cloned().collect();
        let mut again = minimum_operations_table(&profile, &reversed, 7);
        again.reverse();
        assert_eq!(table, again);
    }
}
