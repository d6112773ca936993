use serde::Serialize;

use super::patterns::PatternSummary;
use super::probability::{match_distribution, MatchProbability};
use super::FrequencyTable;
use crate::error::Result;
use crate::models::{Combination, PICK_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberRank {
    pub number: u8,
    pub frequency: u32,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAnalysis {
    pub numbers: Combination,
    pub pattern: PatternSummary,
    /// Hit distribution when all 15 numbers are played.
    pub match_curve: Vec<MatchProbability>,
    pub ranking: Vec<NumberRank>,
}

/// Structural summary, odds curve and (optionally) historical rank of each number.
pub fn analyze_candidate(
    candidate: &Combination,
    table: Option<&FrequencyTable>,
) -> Result<CandidateAnalysis> {
    let ranking = table
        .map(|t| {
            candidate
                .numbers()
                .iter()
                .map(|&number| NumberRank {
                    number,
                    frequency: t.count(number),
                    position: t.rank_of(number),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(CandidateAnalysis {
        numbers: *candidate,
        pattern: PatternSummary::of(candidate),
        match_curve: match_distribution(PICK_COUNT as u32)?,
        ranking,
    })
}
