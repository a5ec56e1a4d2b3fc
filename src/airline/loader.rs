use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::airline::{AirlineProfile, InternalResourceData};

/// One airline's configuration: its public profile plus its internal
/// resource tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirlineFile {
    pub profile: AirlineProfile,
    pub resources: InternalResourceData,
}

impl AirlineFile {
    /// Reads a `.toml` or `.json` airline file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading airline file: {}", path.display()))?;
        let parsed = if is_json(path) {
            Self::from_json(&data)
                .with_context(|| format!("failed parsing JSON airline file: {}", path.display()))?
        } else {
            Self::from_toml(&data)
                .with_context(|| format!("failed parsing TOML airline file: {}", path.display()))?
        };
        parsed
            .validate()
            .with_context(|| format!("invalid airline configuration: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn validate(&self) -> std::result::Result<(), crate::error::ConfigError> {
        self.profile.validate()?;
        self.resources.validate_for(&self.profile)
    }

    pub fn sample() -> Self {
        Self {
            profile: AirlineProfile::sample(),
            resources: InternalResourceData::sample(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
