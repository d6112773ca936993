use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::analysis::intervals::{intervals, IntervalSummary};
use crate::analysis::patterns::{patterns, PatternAggregate};
use crate::analysis::{frequencies, NumberFrequency};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Combination, Draw, DrawSet, PICK_COUNT};
use crate::recommend::recommend_seeded;

const CHECKSUM_ALGORITHM: &str = "sha256";

/// Aggregated statistics handed to the persistence and transport layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub schema_version: u32,
    pub row_count: usize,
    pub contest_min: Option<u32>,
    pub contest_max: Option<u32>,
    pub numbers_per_draw: usize,
    pub frequencies: BTreeMap<u8, u32>,
    pub most_frequent: Vec<NumberFrequency>,
    pub least_frequent: Vec<NumberFrequency>,
    pub intervals: BTreeMap<u8, IntervalSummary>,
    pub patterns: Option<PatternAggregate>,
    pub recommendations: Vec<Combination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl Report {
    /// Recomputes the checksum from `draws` and compares it with the stored one.
    pub fn verify_checksum(&self, draws: &DrawSet) -> Result<bool> {
        match &self.checksum {
            Some(stored) => Ok(*stored == content_checksum(draws, self)?),
            None => Ok(false),
        }
    }
}

#[derive(Serialize)]
struct ChecksumPayload<'a> {
    draws: &'a [Draw],
    stats: ChecksumStats<'a>,
}

#[derive(Serialize)]
struct ChecksumStats<'a> {
    frequencies: &'a BTreeMap<u8, u32>,
    intervals: &'a BTreeMap<u8, IntervalSummary>,
    patterns: &'a Option<PatternAggregate>,
}

/// Digest of the draws and computed statistics.
///
/// Goes through `serde_json::Value`, whose maps are key-ordered, so the byte
/// stream only depends on content. Timestamps, version and recommendations
/// are left out.
pub fn content_checksum(draws: &DrawSet, report: &Report) -> Result<String> {
    let payload = ChecksumPayload {
        draws: draws.chronological(),
        stats: ChecksumStats {
            frequencies: &report.frequencies,
            intervals: &report.intervals,
            patterns: &report.patterns,
        },
    };
    let canonical = serde_json::to_value(&payload)?;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(format!("{}:{}", CHECKSUM_ALGORITHM, hex::encode(Sha256::digest(&bytes))))
}

/// Unix seconds of `generated_at`, bumped past `previous` when the clock
/// has not moved forward.
pub fn next_version(generated_at: DateTime<Utc>, previous: Option<u64>) -> u64 {
    let stamp = generated_at.timestamp().max(0) as u64;
    match previous {
        Some(p) => stamp.max(p + 1),
        None => stamp,
    }
}

pub struct ReportBuilder<'a> {
    draws: &'a DrawSet,
    config: &'a AnalysisConfig,
    generated_at: Option<DateTime<Utc>>,
    recommendations: Option<(usize, u64)>,
    previous_version: Option<u64>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(draws: &'a DrawSet, config: &'a AnalysisConfig) -> Self {
        Self {
            draws,
            config,
            generated_at: None,
            recommendations: None,
            previous_version: None,
        }
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Adds `count` seeded recommendations to the report.
    pub fn recommendations(mut self, count: usize, seed: u64) -> Self {
        self.recommendations = Some((count, seed));
        self
    }

    pub fn previous_version(mut self, version: u64) -> Self {
        self.previous_version = Some(version);
        self
    }

    /// Report without checksum or version.
    pub fn build(&self) -> Result<Report> {
        let draws = self.draws;
        let (table, (interval_table, pattern_report)) = rayon::join(
            || frequencies(draws),
            || rayon::join(|| intervals(draws), || patterns(draws)),
        );

        let recommendations = match self.recommendations {
            Some((count, seed)) => recommend_seeded(&table, count, &self.config.quota, seed)?,
            None => Vec::new(),
        };

        let top_n = self.config.top_n;
        let (most_frequent, least_frequent) = if draws.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (table.most_frequent(top_n), table.least_frequent(top_n))
        };
        let (contest_min, contest_max) = draws.id_range().unzip();

        Ok(Report {
            generated_at: self.generated_at.unwrap_or_else(Utc::now),
            schema_version: self.config.schema_version,
            row_count: draws.len(),
            contest_min,
            contest_max,
            numbers_per_draw: PICK_COUNT,
            frequencies: table.to_map(),
            most_frequent,
            least_frequent,
            intervals: interval_table.iter().map(|(n, r)| (n, r.summary())).collect(),
            patterns: pattern_report.aggregate,
            recommendations,
            checksum: None,
            version: None,
        })
    }

    /// Report with content checksum and version stamp.
    pub fn seal(&self) -> Result<Report> {
        let mut report = self.build()?;
        let checksum = content_checksum(self.draws, &report)?;
        let version = next_version(report.generated_at, self.previous_version);
        tracing::info!(rows = report.row_count, %checksum, version, "report sealed");
        report.checksum = Some(checksum);
        report.version = Some(version);
        Ok(report)
    }
}
