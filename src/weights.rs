use serde::{Deserialize, Serialize};

use crate::airline::AirlineProfile;
use crate::priority::round_to;

pub const MIN_WASTE_WEIGHT: f64 = 0.10;
pub const MAX_WASTE_WEIGHT: f64 = 0.30;

/// Split between leg priority and idle-ground-time penalty in round-trip
/// scoring. Airlines with more slack get a smaller idle-time penalty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AirlineWeights {
    pub resource_abundance: f64,
    pub waste_weight: f64,
    pub priority_weight: f64,
}

impl AirlineWeights {
    pub fn derive(profile: &AirlineProfile) -> Self {
        let abundance = resource_abundance(profile);
        let waste_weight = round_to(
            (0.35 - abundance * 0.2).clamp(MIN_WASTE_WEIGHT, MAX_WASTE_WEIGHT),
            3,
        );
        Self {
            resource_abundance: abundance,
            waste_weight,
            priority_weight: round_to(1.0 - waste_weight, 3),
        }
    }
}

pub fn resource_abundance(profile: &AirlineProfile) -> f64 {
    profile.brand_recognition * 0.3
        + (f64::from(profile.base_demand) / 200.0) * 0.3
        + (profile.scale_count() as f64 / 3.0) * 0.25
        + (profile.avg_route_count() / 35.0) * 0.15
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightsReport {
    pub airline: String,
    pub classification: String,
    pub scale_count: usize,
    pub avg_route_count: f64,
    #[serde(flatten)]
    pub weights: AirlineWeights,
}

impl WeightsReport {
    pub fn for_profile(profile: &AirlineProfile) -> Self {
        Self {
            airline: profile.name.clone(),
            classification: classification(profile).to_string(),
            scale_count: profile.scale_count(),
            avg_route_count: profile.avg_route_count(),
            weights: AirlineWeights::derive(profile),
        }
    }
}

pub fn classification(profile: &AirlineProfile) -> &'static str {
    match profile.scale_count() {
        n if n >= 3 => "major",
        2 => "mid-size",
        _ => "regional",
    }
}
