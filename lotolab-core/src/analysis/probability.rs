use serde::Serialize;

use crate::error::{LotoError, Result};
use crate::models::{PICK_COUNT, POOL_SIZE};

/// C(25, 15): every possible 15-of-25 draw.
pub const TOTAL_COMBINATIONS: u64 = 3_268_760;

/// Exact binomial coefficient, 0 when k > n.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    // each partial product is itself a binomial coefficient, so the division is exact
    (1..=k).fold(1u64, |acc, i| acc * (n - k + i) / i)
}

/// Hypergeometric probability that exactly `hits` of `selected_count` chosen
/// numbers are among the 15 drawn.
///
/// Arguments outside the combinatorial domain give 0.0; only a selection
/// larger than the pool is an error.
pub fn exact_match_probability(hits: u32, selected_count: u32) -> Result<f64> {
    check_selected(selected_count)?;
    Ok(favourable_draws(hits, selected_count) as f64 / TOTAL_COMBINATIONS as f64)
}

/// Number of draws in which exactly `hits` of the selected numbers come out.
fn favourable_draws(hits: u32, selected_count: u32) -> u64 {
    let pool = POOL_SIZE as u64;
    let pick = PICK_COUNT as u64;
    let (k, s) = (hits as u64, selected_count as u64);

    if s > pool || k > s || k > pick || pick - k > pool - s {
        return 0;
    }
    binomial(s, k) * binomial(pool - s, pick - k)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchProbability {
    pub hits: u32,
    pub probability: f64,
    pub percent: f64,
    /// "1 in N" odds, None when the outcome is impossible.
    pub one_in: Option<u64>,
}

/// Probability of every hit count from 0 to min(selected_count, 15).
pub fn match_distribution(selected_count: u32) -> Result<Vec<MatchProbability>> {
    check_selected(selected_count)?;
    let max_hits = selected_count.min(PICK_COUNT as u32);
    let distribution = (0..=max_hits)
        .map(|hits| {
            let favourable = favourable_draws(hits, selected_count);
            let probability = favourable as f64 / TOTAL_COMBINATIONS as f64;
            MatchProbability {
                hits,
                probability,
                percent: probability * 100.0,
                one_in: (favourable > 0).then(|| TOTAL_COMBINATIONS / favourable),
            }
        })
        .collect();
    Ok(distribution)
}

fn check_selected(selected_count: u32) -> Result<()> {
    if selected_count > POOL_SIZE as u32 {
        return Err(LotoError::malformed(
            "selection",
            format!("selected count {} exceeds pool size {}", selected_count, POOL_SIZE),
        ));
    }
    Ok(())
}
