use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::airline::AirlineProfile;
use crate::geo::time::DepartureTime;
use crate::network::RouteType;

pub const PEAK_HOURS: [u32; 5] = [8, 9, 17, 18, 19];
pub const SHOULDER_HOURS: [u32; 2] = [7, 22];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DemandEstimate {
    pub baseline: u32,
    pub elasticity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    Peak,
    Shoulder,
    Regular,
}

impl TimeBand {
    pub fn for_hour(hour: u32) -> Self {
        if PEAK_HOURS.contains(&hour) {
            Self::Peak
        } else if SHOULDER_HOURS.contains(&hour) {
            Self::Shoulder
        } else {
            Self::Regular
        }
    }

    pub fn multiplier_range(self) -> Range<f64> {
        match self {
            Self::Peak => 1.1..1.3,
            Self::Shoulder => 0.7..0.9,
            Self::Regular => 0.9..1.1,
        }
    }
}

pub fn focus_multiplier(profile: &AirlineProfile, route_type: RouteType) -> f64 {
    match route_type {
        RouteType::International => profile.international_focus,
        RouteType::Domestic => profile.domestic_focus,
    }
}

pub fn time_multiplier<R: Rng + ?Sized>(departure: DepartureTime, rng: &mut R) -> f64 {
    rng.gen_range(TimeBand::for_hour(departure.hour()).multiplier_range())
}

pub fn estimate_demand<R: Rng + ?Sized>(
    profile: &AirlineProfile,
    route_type: RouteType,
    departure: DepartureTime,
    rng: &mut R,
) -> DemandEstimate {
    let raw = f64::from(profile.base_demand)
        * profile.brand_recognition
        * focus_multiplier(profile, route_type)
        * time_multiplier(departure, rng);
    DemandEstimate {
        baseline: raw.max(0.0).floor() as u32,
        elasticity: profile.price_elasticity,
    }
}
