use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::error::{LotoError, Result};
use crate::models::{DrawSet, POOL_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::High => write!(f, "HIGH"),
            Trend::Medium => write!(f, "MEDIUM"),
            Trend::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub number: u8,
    pub recent_count: u32,
    pub trend: Trend,
}

/// Appearances of each number among the `window` most recent draws.
pub fn recent_trend(draws: &DrawSet, window: usize) -> Result<Vec<TrendEntry>> {
    if window == 0 {
        return Err(LotoError::InvalidConfig("trend window must be at least 1".to_string()));
    }
    if draws.is_empty() {
        return Err(LotoError::InsufficientData { required: 1, actual: 0 });
    }
    if window > draws.len() {
        tracing::warn!(window, available = draws.len(), "trend window larger than history");
    }

    let mut counts = [0u32; POOL_SIZE as usize];
    for draw in draws.recent_first().take(window) {
        for &n in draw.numbers().numbers() {
            counts[(n - 1) as usize] += 1;
        }
    }

    Ok(counts
        .iter()
        .enumerate()
        .map(|(i, &recent_count)| TrendEntry {
            number: i as u8 + 1,
            recent_count,
            trend: match recent_count {
                c if c > 4 => Trend::High,
                c if c > 2 => Trend::Medium,
                _ => Trend::Low,
            },
        })
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDistribution {
    /// Keyed by weekday number from Monday (0) to Sunday (6).
    pub by_weekday: BTreeMap<u8, usize>,
    pub by_month: BTreeMap<u32, usize>,
}

pub fn calendar_distribution(draws: &DrawSet) -> CalendarDistribution {
    let mut dist = CalendarDistribution::default();
    for draw in draws.chronological() {
        let date = draw.date();
        *dist
            .by_weekday
            .entry(date.weekday().num_days_from_monday() as u8)
            .or_insert(0) += 1;
        *dist.by_month.entry(date.month()).or_insert(0) += 1;
    }
    dist
}
