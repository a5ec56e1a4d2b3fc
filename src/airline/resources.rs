use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::airline::{AirlineProfile, OperationScale};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonnelBucket {
    #[serde(alias = "最大乗客数")]
    pub max_passengers: u32,
    #[serde(alias = "必要人員指数")]
    pub personnel_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonnelRequirements {
    #[serde(alias = "必要機長数")]
    pub captains: u32,
    #[serde(alias = "必要副操縦士数")]
    pub first_officers: u32,
    /// Ascending by `max_passengers`.
    #[serde(alias = "その他必要人員指数")]
    pub index_table: Vec<PersonnelBucket>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turnaround {
    #[serde(alias = "前")]
    pub pre: u32,
    #[serde(alias = "後")]
    pub post: u32,
}

impl Turnaround {
    pub fn total(&self) -> u32 {
        self.pre + self.post
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScaleSpec {
    #[serde(alias = "座席数")]
    pub seats: u32,
    #[serde(alias = "運航可能最小収益")]
    pub min_viable_revenue: u64,
    #[serde(alias = "必要人員データ")]
    pub personnel: PersonnelRequirements,
    #[serde(alias = "飛行前後必要時間")]
    pub turnaround: Turnaround,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InternalResourceData {
    #[serde(alias = "運航規模別データ")]
    pub scales: BTreeMap<OperationScale, ScaleSpec>,
}

impl InternalResourceData {
    pub fn spec(&self, scale: OperationScale) -> Option<&ScaleSpec> {
        self.scales.get(&scale)
    }

    /// Every scale the profile may select (its own scales plus the small
    /// fallback) needs a usable spec.
    pub fn validate_for(&self, profile: &AirlineProfile) -> Result<(), ConfigError> {
        let mut required = profile.operation_scales.clone();
        if !required.contains(&OperationScale::Small) {
            required.push(OperationScale::Small);
        }
        for scale in required {
            let spec = self
                .spec(scale)
                .ok_or(ConfigError::MissingScaleSpec(scale))?;
            if spec.seats == 0 {
                return Err(ConfigError::ZeroSeats(scale));
            }
            let table = &spec.personnel.index_table;
            if table.is_empty() {
                return Err(ConfigError::EmptyPersonnelTable(scale));
            }
            if table
                .windows(2)
                .any(|pair| pair[0].max_passengers > pair[1].max_passengers)
            {
                return Err(ConfigError::UnsortedPersonnelTable(scale));
            }
        }
        Ok(())
    }

    pub fn sample() -> Self {
        let bucket = |max_passengers, personnel_index| PersonnelBucket {
            max_passengers,
            personnel_index,
        };
        let mut scales = BTreeMap::new();
        scales.insert(
            OperationScale::Large,
            ScaleSpec {
                seats: 400,
                min_viable_revenue: 8_000_000,
                personnel: PersonnelRequirements {
                    captains: 2,
                    first_officers: 2,
                    index_table: vec![bucket(300, 8), bucket(350, 9), bucket(400, 10)],
                },
                turnaround: Turnaround { pre: 90, post: 60 },
            },
        );
        scales.insert(
            OperationScale::Medium,
            ScaleSpec {
                seats: 250,
                min_viable_revenue: 4_000_000,
                personnel: PersonnelRequirements {
                    captains: 1,
                    first_officers: 1,
                    index_table: vec![bucket(150, 5), bucket(200, 6), bucket(250, 7)],
                },
                turnaround: Turnaround { pre: 60, post: 45 },
            },
        );
        scales.insert(
            OperationScale::Small,
            ScaleSpec {
                seats: 150,
                min_viable_revenue: 1_500_000,
                personnel: PersonnelRequirements {
                    captains: 1,
                    first_officers: 1,
                    index_table: vec![bucket(50, 2), bucket(100, 3), bucket(150, 4)],
                },
                turnaround: Turnaround { pre: 45, post: 30 },
            },
        );
        Self { scales }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_resources_cover_sample_profile() {
        InternalResourceData::sample()
            .validate_for(&AirlineProfile::sample())
            .expect("sample resources should validate");
    }

    #[test]
    fn small_spec_is_required_even_when_not_listed() {
        let mut resources = InternalResourceData::sample();
        resources.scales.remove(&OperationScale::Small);
        let mut profile = AirlineProfile::sample();
        profile.operation_scales = vec![OperationScale::Large];
        assert_eq!(
            resources.validate_for(&profile),
            Err(ConfigError::MissingScaleSpec(OperationScale::Small))
        );
    }

    #[test]
    fn rejects_unsorted_or_empty_personnel_tables() {
        let profile = AirlineProfile::sample();

        let mut resources = InternalResourceData::sample();
        if let Some(spec) = resources.scales.get_mut(&OperationScale::Medium) {
            spec.personnel.index_table.reverse();
        }
        assert_eq!(
            resources.validate_for(&profile),
            Err(ConfigError::UnsortedPersonnelTable(OperationScale::Medium))
        );

        let mut resources = InternalResourceData::sample();
        if let Some(spec) = resources.scales.get_mut(&OperationScale::Large) {
            spec.personnel.index_table.clear();
        }
        assert_eq!(
            resources.validate_for(&profile),
            Err(ConfigError::EmptyPersonnelTable(OperationScale::Large))
        );
    }

    #[test]
    fn deserializes_japanese_resource_keys() {
        let raw = r#"{
            "運航規模別データ": {
                "小規模運航": {
                    "座席数": 120,
                    "運航可能最小収益": 1200000,
                    "必要人員データ": {
                        "必要機長数": 1,
                        "必要副操縦士数": 1,
                        "その他必要人員指数": [
                            {"最大乗客数": 60, "必要人員指数": 2},
                            {"最大乗客数": 120, "必要人員指数": 3}
                        ]
                    },
                    "飛行前後必要時間": {"前": 40, "後": 30}
                }
            }
        }"#;
        let parsed: InternalResourceData =
            serde_json::from_str(raw).expect("failed to parse resource data");
        let small = parsed
            .spec(OperationScale::Small)
            .expect("missing small spec");
        assert_eq!(small.seats, 120);
        assert_eq!(small.personnel.index_table.len(), 2);
        assert_eq!(small.turnaround.total(), 70);
    }
}
