use serde::{Deserialize, Serialize};

use crate::airline::{AirlineProfile, InternalResourceData, OperationScale, PersonnelBucket};
use crate::error::ConfigError;

pub const LARGE_DEMAND_THRESHOLD: u32 = 300;
pub const MEDIUM_DEMAND_THRESHOLD: u32 = 150;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewPair {
    pub captains: u32,
    pub first_officers: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationScaleAssignment {
    pub scale: OperationScale,
    pub seats: u32,
    pub min_viable_revenue: u64,
    pub crew: CrewPair,
    pub personnel_index: u32,
    pub turnaround_pre: u32,
    pub turnaround_post: u32,
}

impl OperationScaleAssignment {
    pub fn turnaround_total(&self) -> u32 {
        self.turnaround_pre + self.turnaround_post
    }
}

/// Small is the fallback whether or not the profile lists it.
pub fn choose_scale(demand: u32, profile: &AirlineProfile) -> OperationScale {
    if profile.supports(OperationScale::Large) && demand > LARGE_DEMAND_THRESHOLD {
        OperationScale::Large
    } else if profile.supports(OperationScale::Medium) && demand > MEDIUM_DEMAND_THRESHOLD {
        OperationScale::Medium
    } else {
        OperationScale::Small
    }
}

/// First bucket whose `max_passengers` covers the demand; demand beyond the
/// last bucket clamps to it. `None` only for an empty table.
pub fn personnel_index(demand: u32, table: &[PersonnelBucket]) -> Option<u32> {
    table
        .iter()
        .find(|bucket| bucket.max_passengers >= demand)
        .or_else(|| table.last())
        .map(|bucket| bucket.personnel_index)
}

pub fn assign_scale(
    demand: u32,
    profile: &AirlineProfile,
    resources: &InternalResourceData,
) -> Result<OperationScaleAssignment, ConfigError> {
    let scale = choose_scale(demand, profile);
    let spec = resources
        .spec(scale)
        .ok_or(ConfigError::MissingScaleSpec(scale))?;
    let personnel_index = personnel_index(demand, &spec.personnel.index_table)
        .ok_or(ConfigError::EmptyPersonnelTable(scale))?;
    Ok(OperationScaleAssignment {
        scale,
        seats: spec.seats,
        min_viable_revenue: spec.min_viable_revenue,
        crew: CrewPair {
            captains: spec.personnel.captains,
            first_officers: spec.personnel.first_officers,
        },
        personnel_index,
        turnaround_pre: spec.turnaround.pre,
        turnaround_post: spec.turnaround.post,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(scale: OperationScale) -> u8 {
        match scale {
            OperationScale::Small => 0,
            OperationScale::Medium => 1,
            OperationScale::Large => 2,
        }
    }

    #[test]
    fn thresholds_are_strict() {
        let profile = AirlineProfile::sample();
        assert_eq!(choose_scale(150, &profile), OperationScale::Small);
        assert_eq!(choose_scale(151, &profile), OperationScale::Medium);
        assert_eq!(choose_scale(300, &profile), OperationScale::Medium);
        assert_eq!(choose_scale(301, &profile), OperationScale::Large);
    }

    #[test]
    fn respects_profile_scale_set() {
        let mut profile = AirlineProfile::sample();
        profile.operation_scales = vec![OperationScale::Medium, OperationScale::Small];
        assert_eq!(choose_scale(900, &profile), OperationScale::Medium);

        profile.operation_scales = vec![OperationScale::Large];
        assert_eq!(choose_scale(200, &profile), OperationScale::Small);
        assert_eq!(choose_scale(301, &profile), OperationScale::Large);
    }

    #[test]
    fn selection_is_monotone_in_demand() {
        let mut profile = AirlineProfile::sample();
        for scales in [
            OperationScale::ALL.to_vec(),
            vec![OperationScale::Medium, OperationScale::Small],
            vec![OperationScale::Large, OperationScale::Small],
            vec![OperationScale::Small],
        ] {
            profile.operation_scales = scales;
            let ranks: Vec<u8> = (10..600).map(|d| rank(choose_scale(d, &profile))).collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn personnel_index_picks_first_covering_bucket_and_clamps_overflow() {
        let table = [
            PersonnelBucket {
                max_passengers: 50,
                personnel_index: 2,
            },
            PersonnelBucket {
                max_passengers: 100,
                personnel_index: 3,
            },
            PersonnelBucket {
                max_passengers: 150,
                personnel_index: 4,
            },
        ];
        assert_eq!(personnel_index(10, &table), Some(2));
        assert_eq!(personnel_index(50, &table), Some(2));
        assert_eq!(personnel_index(51, &table), Some(3));
        assert_eq!(personnel_index(150, &table), Some(4));
        assert_eq!(personnel_index(1_000, &table), Some(4));
        assert_eq!(personnel_index(10, &[]), None);
    }

    #[test]
    fn assigns_resources_from_spec() {
        let profile = AirlineProfile::sample();
        let resources = InternalResourceData::sample();
        let assignment = assign_scale(320, &profile, &resources).expect("assignment");
        assert_eq!(assignment.scale, OperationScale::Large);
        assert_eq!(assignment.seats, 400);
        assert_eq!(assignment.personnel_index, 9);
        assert_eq!(
            assignment.crew,
            CrewPair {
                captains: 2,
                first_officers: 2,
            }
        );
        assert_eq!(assignment.turnaround_total(), 150);
    }

    #[test]
    fn missing_spec_is_a_configuration_error() {
        let profile = AirlineProfile::sample();
        let mut resources = InternalResourceData::sample();
        resources.scales.remove(&OperationScale::Medium);
        assert_eq!(
            assign_scale(200, &profile, &resources),
            Err(ConfigError::MissingScaleSpec(OperationScale::Medium))
        );
    }
}
