use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Combination, DrawSet, LOW_MAX, PICK_COUNT};

/// Structural features of one 15-number combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub sum: u32,
    pub mean: f64,
    pub even_count: u8,
    pub odd_count: u8,
    pub low_count: u8,
    pub high_count: u8,
    pub longest_run: u8,
}

impl PatternSummary {
    pub fn of(combination: &Combination) -> Self {
        let numbers = combination.numbers();
        let sum: u32 = numbers.iter().map(|&n| n as u32).sum();
        let even_count = numbers.iter().filter(|&&n| n % 2 == 0).count() as u8;
        let low_count = numbers.iter().filter(|&&n| n <= LOW_MAX).count() as u8;
        let pick = PICK_COUNT as u8;
        Self {
            sum,
            mean: sum as f64 / PICK_COUNT as f64,
            even_count,
            odd_count: pick - even_count,
            low_count,
            high_count: pick - low_count,
            longest_run: longest_run(numbers),
        }
    }
}

/// Length of the longest run of consecutive integers; 0 for an empty slice.
pub fn longest_run(numbers: &[u8]) -> u8 {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    let mut best = 0u8;
    let mut current = 0u8;
    let mut previous: Option<u8> = None;
    for &n in &sorted {
        current = match previous {
            Some(p) if p.checked_add(1) == Some(n) => current + 1,
            _ => {
                best = best.max(current);
                1
            }
        };
        previous = Some(n);
    }
    // the run still open when the scan ends
    best.max(current)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPattern {
    pub id: u32,
    pub date: NaiveDate,
    pub summary: PatternSummary,
}

/// Dataset-wide means of the per-draw features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAggregate {
    pub sum: f64,
    pub mean: f64,
    pub even_count: f64,
    pub odd_count: f64,
    pub low_count: f64,
    pub high_count: f64,
    pub longest_run: f64,
    pub max_longest_run: u8,
    /// Mean count of numbers repeated from the previous draw.
    pub mean_repeats: Option<f64>,
    /// Percentage of all drawn numbers that are even.
    pub even_share: f64,
    pub odd_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternReport {
    pub per_draw: Vec<DrawPattern>,
    pub aggregate: Option<PatternAggregate>,
}

pub fn patterns(draws: &DrawSet) -> PatternReport {
    let per_draw: Vec<DrawPattern> = draws
        .chronological()
        .iter()
        .map(|d| DrawPattern {
            id: d.id(),
            date: d.date(),
            summary: PatternSummary::of(d.numbers()),
        })
        .collect();

    let aggregate = aggregate(&per_draw, mean_repeats(draws));
    tracing::debug!(draws = draws.len(), "pattern pass complete");
    PatternReport { per_draw, aggregate }
}

fn aggregate(per_draw: &[DrawPattern], mean_repeats: Option<f64>) -> Option<PatternAggregate> {
    if per_draw.is_empty() {
        return None;
    }
    let n = per_draw.len() as f64;
    let mean_of = |f: fn(&PatternSummary) -> f64| per_draw.iter().map(|p| f(&p.summary)).sum::<f64>() / n;

    let even_count = mean_of(|s| s.even_count as f64);
    let odd_count = mean_of(|s| s.odd_count as f64);
    Some(PatternAggregate {
        sum: mean_of(|s| s.sum as f64),
        mean: mean_of(|s| s.mean),
        even_count,
        odd_count,
        low_count: mean_of(|s| s.low_count as f64),
        high_count: mean_of(|s| s.high_count as f64),
        longest_run: mean_of(|s| s.longest_run as f64),
        max_longest_run: per_draw.iter().map(|p| p.summary.longest_run).max().unwrap_or(0),
        mean_repeats,
        even_share: even_count / PICK_COUNT as f64 * 100.0,
        odd_share: odd_count / PICK_COUNT as f64 * 100.0,
    })
}

/// Mean overlap between chronologically consecutive draws.
pub fn mean_repeats(draws: &DrawSet) -> Option<f64> {
    let chrono = draws.chronological();
    if chrono.len() < 2 {
        return None;
    }
    let total: usize = chrono
        .windows(2)
        .map(|w| w[0].numbers().overlap(w[1].numbers()))
        .sum();
    Some(total as f64 / (chrono.len() - 1) as f64)
}
