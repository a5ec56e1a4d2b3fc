use thiserror::Error;

use crate::airline::OperationScale;
use crate::geo::time::TimeParseError;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must lie in [0, 1], got {value}")]
    UnitRange { field: &'static str, value: f64 },
    #[error("base_demand must be positive")]
    NonPositiveDemand,
    #[error("price_elasticity must be negative, got {0}")]
    NonNegativeElasticity(f64),
    #[error("profile lists no operation scales")]
    NoOperationScales,
    #[error("operation scale {0} listed more than once")]
    DuplicateScale(OperationScale),
    #[error("route_count_range must be ordered, got [{0}, {1}]")]
    InvalidRouteCountRange(u32, u32),
    #[error("no resource data for operation scale {0}")]
    MissingScaleSpec(OperationScale),
    #[error("operation scale {0} has zero seats")]
    ZeroSeats(OperationScale),
    #[error("personnel index table for {0} is empty")]
    EmptyPersonnelTable(OperationScale),
    #[error("personnel index table for {0} is not sorted by max_passengers")]
    UnsortedPersonnelTable(OperationScale),
    #[error("departure window is empty: {first} .. {last} every {interval} minutes")]
    EmptyDepartureWindow {
        first: String,
        last: String,
        interval: u32,
    },
    #[error(transparent)]
    Time(#[from] TimeParseError),
    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}
