pub mod loader;
pub mod resources;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigError;

pub use resources::{InternalResourceData, PersonnelBucket, ScaleSpec, Turnaround};

/// Average route count assumed when a profile carries neither a range nor a
/// connected-airport list.
pub const DEFAULT_AVG_ROUTE_COUNT: f64 = 15.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OperationScale {
    #[serde(alias = "大規模運航")]
    Large,
    #[serde(alias = "中規模運航")]
    Medium,
    #[serde(alias = "小規模運航")]
    Small,
}

impl OperationScale {
    pub const ALL: [OperationScale; 3] = [
        OperationScale::Large,
        OperationScale::Medium,
        OperationScale::Small,
    ];

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

impl Display for OperationScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown operation scale: {0}")]
pub struct ScaleParseError(pub String);

impl FromStr for OperationScale {
    type Err = ScaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" | "大規模運航" => Ok(Self::Large),
            "medium" | "中規模運航" => Ok(Self::Medium),
            "small" | "小規模運航" => Ok(Self::Small),
            _ => Err(ScaleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirlineProfile {
    #[serde(default)]
    pub name: String,
    pub brand_recognition: f64,
    pub international_focus: f64,
    pub domestic_focus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_diversity: Option<String>,
    pub base_demand: u32,
    pub price_elasticity: f64,
    pub operation_scales: Vec<OperationScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_count_range: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_airports: Option<Vec<String>>,
}

impl AirlineProfile {
    pub fn supports(&self, scale: OperationScale) -> bool {
        self.operation_scales.contains(&scale)
    }

    pub fn scale_count(&self) -> usize {
        self.operation_scales.len()
    }

    pub fn avg_route_count(&self) -> f64 {
        if let Some((low, high)) = self.route_count_range {
            return f64::from(low + high) / 2.0;
        }
        match &self.connected_airports {
            Some(airports) if !airports.is_empty() => airports.len() as f64,
            _ => DEFAULT_AVG_ROUTE_COUNT,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("brand_recognition", self.brand_recognition),
            ("international_focus", self.international_focus),
            ("domestic_focus", self.domestic_focus),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::UnitRange { field, value });
            }
        }
        if self.base_demand == 0 {
            return Err(ConfigError::NonPositiveDemand);
        }
        if self.price_elasticity.is_nan() || self.price_elasticity >= 0.0 {
            return Err(ConfigError::NonNegativeElasticity(self.price_elasticity));
        }
        if self.operation_scales.is_empty() {
            return Err(ConfigError::NoOperationScales);
        }
        for (idx, scale) in self.operation_scales.iter().enumerate() {
            if self.operation_scales[..idx].contains(scale) {
                return Err(ConfigError::DuplicateScale(*scale));
            }
        }
        if let Some((low, high)) = self.route_count_range {
            if low > high {
                return Err(ConfigError::InvalidRouteCountRange(low, high));
            }
        }
        Ok(())
    }

    /// Flagship-carrier profile; the CLI falls back to it when no airline
    /// file is configured.
    pub fn sample() -> Self {
        Self {
            name: "airline_01".to_string(),
            brand_recognition: 0.9,
            international_focus: 0.8,
            domestic_focus: 0.6,
            route_diversity: Some("high".to_string()),
            base_demand: 150,
            price_elasticity: -0.3,
            operation_scales: OperationScale::ALL.to_vec(),
            route_count_range: Some((25, 35)),
            connected_airports: None,
        }
    }
}
