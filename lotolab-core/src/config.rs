use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::recommend::TierQuota;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Embedded in every report as `schemaVersion`.
    pub schema_version: u32,
    pub quota: TierQuota,
    /// Draws looked at by the recent-trend pass.
    pub trend_window: usize,
    /// How many most/least frequent numbers to list.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            quota: TierQuota::default(),
            trend_window: 20,
            top_n: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config {:?}", path))?;
        let config: AnalysisConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {:?}", path))?;
        config.quota.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Cannot write config {:?}", path))?;
        Ok(())
    }
}
