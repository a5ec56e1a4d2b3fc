use std::f64::consts::PI;

use crate::airline::AirlineProfile;
use crate::geo::time::DepartureTime;
use crate::network::RouteType;
use crate::priority::hashing::stable_hash;
use crate::scale::OperationScaleAssignment;

pub const AIRCRAFT_WEIGHT: f64 = 5.0;
pub const PERSONNEL_WEIGHT: f64 = 3.0;
pub const TURNAROUND_WEIGHT: f64 = 2.0;
pub const EFFICIENCY_CAP: f64 = 35.0;

const UNIQUENESS_TERMS: usize = 16;

pub fn weighted_resources(assignment: &OperationScaleAssignment) -> f64 {
    f64::from(assignment.seats) * AIRCRAFT_WEIGHT
        + f64::from(assignment.personnel_index) * PERSONNEL_WEIGHT
        + f64::from(assignment.turnaround_total()) * TURNAROUND_WEIGHT
}

pub fn efficiency(revenue: f64, weighted_resources: f64) -> f64 {
    let per_resource = if weighted_resources > 0.0 {
        revenue / weighted_resources * 0.1
    } else {
        0.0
    };
    let scaled = (revenue / 1e6 + 1.0).log10() * 8.7642;
    (per_resource + scaled).min(EFFICIENCY_CAP)
}

/// Jitter in [0, 1) derived from the route type, time, and revenue.
pub fn route_seed(route_type: RouteType, departure: DepartureTime, revenue: u64) -> f64 {
    let hash = stable_hash(&format!("{route_type}_{departure}_{revenue}"));
    (hash % 1_000_000) as f64 / 1_000_000.0
}

pub fn route_type_score(route_type: RouteType, seed: f64, profile: &AirlineProfile) -> f64 {
    let (base, multiplier) = match route_type {
        RouteType::International => (
            12.0 + seed * 8.0,
            1.0 + (profile.international_focus - 0.5) * 0.3,
        ),
        RouteType::Domestic => (
            8.0 + seed * 7.0,
            1.0 + (profile.domestic_focus - 0.5) * 0.2,
        ),
    };
    base * multiplier
}

pub fn hour_base(hour: u32) -> f64 {
    match hour {
        7 => 5.2,
        8 => 18.7,
        9 => 17.3,
        10 => 12.8,
        11 => 14.1,
        12 => 13.9,
        13 => 11.6,
        14 => 12.4,
        15 => 13.7,
        16 => 15.2,
        17 => 19.1,
        18 => 18.9,
        19 => 17.8,
        20 => 14.3,
        21 => 12.1,
        22 => 8.4,
        _ => 10.0,
    }
}

pub fn time_of_day_score(departure: DepartureTime) -> f64 {
    let hour = f64::from(departure.hour());
    let minute = f64::from(departure.minute());
    let minute_factor = 1.0 + (minute - 15.0) * 0.001234;
    let noise = (hour * 0.7 + minute * 0.1).sin() * 2.3456;
    hour_base(departure.hour()) * minute_factor + noise
}

pub fn brand_score(brand: f64) -> f64 {
    let polynomial = 3.2 * brand.powi(3) + 2.1 * brand.powi(2) + 4.7 * brand;
    polynomial + (brand * 17.234).cos() * 0.8765
}

pub fn revenue_bonus(revenue: u64) -> f64 {
    let millions = revenue as f64 / 1e6;
    let power = millions.powf(0.7854) * 2.3456;
    let log = (millions + 0.5).ln() * 1.9876;
    if revenue > 5_000_000 {
        7.8 + power * 0.3 + log
    } else if revenue > 3_000_000 {
        4.2 + power * 0.2 + log * 0.8
    } else {
        1.5 + power * 0.1 + log * 0.5
    }
}

/// Rewards balanced seat/personnel ratios and penalizes their divergence.
pub fn resource_harmony(assignment: &OperationScaleAssignment) -> f64 {
    let seat_ratio = f64::from(assignment.seats) / 300.0;
    let personnel_ratio = f64::from(assignment.personnel_index) / 10.0;
    let harmony = (seat_ratio * PI).sin() * (personnel_ratio * 2.718).cos() * 3.456;
    let imbalance = (seat_ratio - personnel_ratio).abs() * -2.789;
    harmony + imbalance + 8.0
}

pub fn uniqueness(factors: &[f64]) -> f64 {
    factors
        .iter()
        .take(UNIQUENESS_TERMS)
        .enumerate()
        .map(|(i, &f)| {
            let k = (i + 1) as f64;
            let i = i as f64;
            f * k * 0.123456789
                + (f * k * 7.891234).sin() * 0.456789
                + (f * k * 11.234567).cos() * 0.789012
                + (f * 0.1 + i * 0.01).tan() * 0.234567
                + (f * 0.01).exp() * 0.012345
                + (f + 0.001).ln() * 0.567890
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airline::OperationScale;
    use crate::scale::CrewPair;

    fn assignment(seats: u32, personnel_index: u32) -> OperationScaleAssignment {
        OperationScaleAssignment {
            scale: OperationScale::Medium,
            seats,
            min_viable_revenue: 4_000_000,
            crew: CrewPair {
                captains: 1,
                first_officers: 1,
            },
            personnel_index,
            turnaround_pre: 60,
            turnaround_post: 45,
        }
    }

    #[test]
    fn weights_resources_five_three_two() {
        // 250*5 + 6*3 + 105*2
        assert_eq!(weighted_resources(&assignment(250, 6)), 1478.0);
    }

    #[test]
    fn efficiency_is_capped() {
        assert_eq!(efficiency(50_000_000.0, 100.0), EFFICIENCY_CAP);
        let modest = efficiency(2_000_000.0, 10_000.0);
        let expected = 20.0 + 3.0f64.log10() * 8.7642;
        assert!((modest - expected).abs() < 1e-9);
        assert!(modest < EFFICIENCY_CAP);
    }

    #[test]
    fn route_seed_is_deterministic_unit_value() {
        let t: DepartureTime = "09:30".parse().expect("time");
        let a = route_seed(RouteType::International, t, 3_542_000);
        let b = route_seed(RouteType::International, t, 3_542_000);
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
    }

    #[test]
    fn route_type_score_grows_with_matching_focus() {
        let mut profile = AirlineProfile::sample();
        profile.international_focus = 0.2;
        let low = route_type_score(RouteType::International, 0.5, &profile);
        profile.international_focus = 0.9;
        let high = route_type_score(RouteType::International, 0.5, &profile);
        assert!(high > low);
        profile.domestic_focus = 0.5;
        assert!((route_type_score(RouteType::Domestic, 0.0, &profile) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn peak_hours_outscore_shoulder_hours() {
        let peak = time_of_day_score("08:00".parse().expect("time"));
        let shoulder = time_of_day_score("07:00".parse().expect("time"));
        assert!(peak > shoulder);
        let on_hour = time_of_day_score("14:00".parse().expect("time"));
        let half_past = time_of_day_score("14:30".parse().expect("time"));
        assert_ne!(on_hour, half_past);
    }

    #[test]
    fn revenue_bonus_tiers_step_up() {
        assert!(revenue_bonus(3_000_001) > revenue_bonus(3_000_000));
        assert!(revenue_bonus(5_000_001) > revenue_bonus(5_000_000));
    }

    #[test]
    fn harmony_penalizes_imbalance() {
        // 300 seats vs index 1 is more imbalanced than 300 seats vs index 10.
        let balanced = resource_harmony(&assignment(300, 10));
        let skewed = resource_harmony(&assignment(300, 1));
        assert!(balanced > skewed);
        assert!((resource_harmony(&assignment(0, 0)) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn uniqueness_uses_sixteen_factors() {
        let factors: Vec<f64> = (0..32).map(|i| i as f64 / 32.0).collect();
        assert_eq!(uniqueness(&factors), uniqueness(&factors[..16]));
        assert!(uniqueness(&factors).is_finite());
    }
}
