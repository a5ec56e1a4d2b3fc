pub mod time;

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::network::airports;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_DISTANCE_KM: f64 = 1000.0;
pub const CRUISE_SPEED_KMH: f64 = 800.0;
pub const MIN_FLIGHT_MINUTES: u32 = 30;
pub const MAX_FLIGHT_MINUTES: u32 = 480;
const FLIGHT_TIME_STEP: f64 = 30.0;

/// Great-circle distance in km, or [`DEFAULT_DISTANCE_KM`] when either airport
/// has no known coordinates.
pub fn distance(a: &str, b: &str) -> f64 {
    match (airports::coordinates(a), airports::coordinates(b)) {
        (Some((lat1, lon1)), Some((lat2, lon2))) => haversine_km(lat1, lon1, lat2, lon2),
        _ => {
            warn!("no coordinates for {a} -> {b}, using default distance");
            DEFAULT_DISTANCE_KM
        }
    }
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Block time in minutes for a distance, rounded to the nearest half hour.
/// Exact half steps round to the even step.
pub fn flight_minutes_for_distance(distance_km: f64) -> u32 {
    let steps = distance_km / CRUISE_SPEED_KMH * 60.0 / FLIGHT_TIME_STEP;
    let minutes = steps.round_ties_even() * FLIGHT_TIME_STEP;
    (minutes.max(0.0) as u32).clamp(MIN_FLIGHT_MINUTES, MAX_FLIGHT_MINUTES)
}

/// Memoized flight times keyed by ordered (departure, arrival).
#[derive(Debug, Default)]
pub struct FlightTimeCache {
    entries: Mutex<HashMap<(String, String), u32>>,
}

impl FlightTimeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flight_time(&self, departure: &str, arrival: &str) -> u32 {
        let key = (departure.to_string(), arrival.to_string());
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard
            .entry(key)
            .or_insert_with(|| flight_minutes_for_distance(distance(departure, arrival)))
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_matches_known_distance() {
        // Haneda to Incheon is roughly 1,160 km.
        let d = distance("HND", "ICN");
        assert!((1100.0..1250.0).contains(&d), "unexpected distance {d}");
        assert!(distance("HND", "HND").abs() < 1e-9);
    }

    #[test]
    fn unknown_airport_uses_default_distance() {
        assert_eq!(distance("HND", "GMP"), DEFAULT_DISTANCE_KM);
        // 1000 km / 800 km/h = 75 min, 2.5 half hours -> 60
        assert_eq!(flight_minutes_for_distance(DEFAULT_DISTANCE_KM), 60);
        assert_eq!(FlightTimeCache::new().flight_time("HND", "GMP"), 60);
    }

    #[test]
    fn half_steps_round_to_even() {
        // 45 min -> 1.5 steps, 105 min -> 3.5 steps, 135 min -> 4.5 steps
        assert_eq!(flight_minutes_for_distance(600.0), 60);
        assert_eq!(flight_minutes_for_distance(1400.0), 120);
        assert_eq!(flight_minutes_for_distance(1800.0), 120);
    }

    #[test]
    fn flight_minutes_are_rounded_and_clamped() {
        assert_eq!(flight_minutes_for_distance(0.0), MIN_FLIGHT_MINUTES);
        assert_eq!(flight_minutes_for_distance(150.0), 30);
        assert_eq!(flight_minutes_for_distance(1600.0), 120);
        assert_eq!(flight_minutes_for_distance(20_000.0), MAX_FLIGHT_MINUTES);
        for km in [10.0, 333.0, 777.0, 2500.0, 4100.0, 9000.0] {
            let minutes = flight_minutes_for_distance(km);
            assert_eq!(minutes % 30, 0);
            assert!((MIN_FLIGHT_MINUTES..=MAX_FLIGHT_MINUTES).contains(&minutes));
        }
    }

    #[test]
    fn cache_memoizes_per_ordered_pair() {
        let cache = FlightTimeCache::new();
        assert!(cache.is_empty());
        let out = cache.flight_time("HND", "SIN");
        let again = cache.flight_time("HND", "SIN");
        let back = cache.flight_time("SIN", "HND");
        assert_eq!(out, again);
        assert_eq!(out, back);
        assert_eq!(cache.len(), 2);
    }
}
