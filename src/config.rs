use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::schedule::{
    DEFAULT_FIRST_DEPARTURE, DEFAULT_INTERVAL_MINUTES, DEFAULT_LAST_DEPARTURE,
};
use crate::engine::MonthSchedule;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub airline: AirlineConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub round_trip: RoundTripConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Paths to the airline file and route list. An empty path falls back to
/// the built-in sample data.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AirlineConfig {
    #[serde(default)]
    pub profile_path: String,
    #[serde(default)]
    pub routes_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleConfig {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_month")]
    pub month: u32,
    #[serde(default = "default_first_departure")]
    pub first_departure: String,
    #[serde(default = "default_last_departure")]
    pub last_departure: String,
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub debug_sample_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundTripConfig {
    #[serde(default = "default_max_day_offset")]
    pub max_day_offset: u32,
    #[serde(default)]
    pub feasible_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile_path: Option<String>,
    pub routes_path: Option<String>,
    pub seed: Option<u64>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/slot-oracle/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(profile_path) = overrides.profile_path {
            self.airline.profile_path = profile_path;
        }
        if let Some(routes_path) = overrides.routes_path {
            self.airline.routes_path = routes_path;
        }
        if let Some(seed) = overrides.seed {
            self.engine.seed = seed;
        }
        if let Some(year) = overrides.year {
            self.schedule.year = year;
        }
        if let Some(month) = overrides.month {
            self.schedule.month = month;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn month_schedule(&self) -> Result<MonthSchedule> {
        let s = &self.schedule;
        MonthSchedule::from_window(
            s.year,
            s.month,
            &s.first_departure,
            &s.last_departure,
            s.interval_minutes,
        )
        .context("invalid [schedule] section")
    }

    pub fn resolved_profile_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.airline.profile_path)
    }

    pub fn resolved_routes_path(&self) -> Option<PathBuf> {
        non_empty_path(&self.airline.routes_path)
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        expand_tilde(&self.output.dir)
    }

    pub fn default_template() -> String {
        let template = r#"[airline]
# TOML or JSON airline file with [profile] and [resources]; empty uses the sample airline
profile_path = ""
# CSV or JSON route list; empty uses the sample network
routes_path = ""

[schedule]
year = 2025
month = 3
first_departure = "07:00"
last_departure = "22:30"
interval_minutes = 30

[engine]
seed = 42
debug_sample_rate = 0.0

[round_trip]
max_day_offset = 1
feasible_only = false

[output]
dir = "~/.local/share/slot-oracle"
"#;
        template.to_string()
    }
}

fn non_empty_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| expand_tilde(trimmed))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            month: default_month(),
            first_departure: default_first_departure(),
            last_departure: default_last_departure(),
            interval_minutes: default_interval_minutes(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            debug_sample_rate: 0.0,
        }
    }
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            max_day_offset: default_max_day_offset(),
            feasible_only: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_year() -> i32 {
    2025
}

fn default_month() -> u32 {
    3
}

fn default_first_departure() -> String {
    DEFAULT_FIRST_DEPARTURE.to_string()
}

fn default_last_departure() -> String {
    DEFAULT_LAST_DEPARTURE.to_string()
}

fn default_interval_minutes() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

fn default_seed() -> u64 {
    42
}

fn default_max_day_offset() -> u32 {
    1
}

fn default_output_dir() -> String {
    "~/.local/share/slot-oracle".to_string()
}
