pub mod airports;
pub mod minimum_ops;
pub mod routes;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::time::DepartureTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Domestic,
    International,
}

impl RouteType {
    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::International => "international",
        }
    }
}

impl Display for RouteType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown route type: {0}")]
pub struct RouteTypeParseError(pub String);

impl FromStr for RouteType {
    type Err = RouteTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Ok(Self::Domestic),
            "international" | "intl" => Ok(Self::International),
            _ => Err(RouteTypeParseError(s.to_string())),
        }
    }
}

/// Direction relative to the home country.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Departure,
    Arrival,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Route {
    pub departure: String,
    pub arrival: String,
    pub departure_country: String,
    pub arrival_country: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub direction: Direction,
}

impl Route {
    pub fn label(&self) -> String {
        format!("{} -> {}", self.departure, self.arrival)
    }
}

/// Output grouping used when candidates are written per dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    InternationalDeparture,
    InternationalArrival,
    Domestic,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [
        Dataset::InternationalDeparture,
        Dataset::InternationalArrival,
        Dataset::Domestic,
    ];

    pub fn for_route(route: &Route) -> Self {
        match (route.route_type, route.direction) {
            (RouteType::Domestic, _) => Self::Domestic,
            (RouteType::International, Direction::Departure) => Self::InternationalDeparture,
            (RouteType::International, _) => Self::InternationalArrival,
        }
    }

    pub fn as_slug(&self) -> &'static str {
        match self {
            Self::InternationalDeparture => "international_departure",
            Self::InternationalArrival => "international_arrival",
            Self::Domestic => "domestic",
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown dataset: {0}")]
pub struct DatasetParseError(pub String);

impl FromStr for Dataset {
    type Err = DatasetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Dataset::ALL
            .into_iter()
            .find(|d| d.as_slug() == normalized)
            .ok_or_else(|| DatasetParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlot<'a> {
    pub route: &'a Route,
    pub date: NaiveDate,
    pub departure_time: DepartureTime,
}
