pub mod candidate;
pub mod intervals;
pub mod patterns;
pub mod probability;
pub mod temporal;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{DrawSet, PICK_COUNT, POOL_SIZE};

/// Occurrence count of every number over a draw set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; POOL_SIZE as usize],
    draw_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberFrequency {
    pub number: u8,
    pub frequency: u32,
}

pub fn frequencies(draws: &DrawSet) -> FrequencyTable {
    let mut counts = [0u32; POOL_SIZE as usize];
    for draw in draws.chronological() {
        for &n in draw.numbers().numbers() {
            counts[(n - 1) as usize] += 1;
        }
    }
    tracing::debug!(draws = draws.len(), "frequency pass complete");
    FrequencyTable {
        counts,
        draw_count: draws.len(),
    }
}

impl FrequencyTable {
    /// Builds a table from explicit counts, indexed by number - 1.
    pub fn from_counts(counts: [u32; POOL_SIZE as usize], draw_count: usize) -> Self {
        Self { counts, draw_count }
    }

    pub fn count(&self, number: u8) -> u32 {
        match number {
            1..=POOL_SIZE => self.counts[(number - 1) as usize],
            _ => 0,
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Sum of all counts; 15 per draw on a well-formed set.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Share of all drawn numbers taken by `number`.
    pub fn relative(&self, number: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(number) as f64 / total as f64
    }

    /// Mean count per number.
    pub fn mean(&self) -> f64 {
        self.total() as f64 / POOL_SIZE as f64
    }

    /// Share of draws containing `number`, versus the 15/25 expected under uniform draws.
    pub fn hit_rate(&self, number: u8) -> f64 {
        if self.draw_count == 0 {
            return PICK_COUNT as f64 / POOL_SIZE as f64;
        }
        self.count(number) as f64 / self.draw_count as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = NumberFrequency> + '_ {
        self.counts.iter().enumerate().map(|(i, &frequency)| NumberFrequency {
            number: i as u8 + 1,
            frequency,
        })
    }

    /// Count descending; equal counts go to the lowest number first.
    pub fn ranking(&self) -> Vec<NumberFrequency> {
        let mut ranked: Vec<NumberFrequency> = self.iter().collect();
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));
        ranked
    }

    /// Count ascending; equal counts go to the lowest number first.
    pub fn ascending_ranking(&self) -> Vec<NumberFrequency> {
        let mut ranked: Vec<NumberFrequency> = self.iter().collect();
        ranked.sort_by(|a, b| a.frequency.cmp(&b.frequency).then(a.number.cmp(&b.number)));
        ranked
    }

    pub fn most_frequent(&self, k: usize) -> Vec<NumberFrequency> {
        self.ranking().into_iter().take(k).collect()
    }

    pub fn least_frequent(&self, k: usize) -> Vec<NumberFrequency> {
        self.ascending_ranking().into_iter().take(k).collect()
    }

    /// Most frequent number, None when no draw was counted.
    pub fn top(&self) -> Option<u8> {
        if self.draw_count == 0 {
            return None;
        }
        self.ranking().first().map(|f| f.number)
    }

    /// Least frequent number, None when no draw was counted.
    pub fn bottom(&self) -> Option<u8> {
        if self.draw_count == 0 {
            return None;
        }
        self.ascending_ranking().first().map(|f| f.number)
    }

    /// Competition rank: 1 + count of numbers with a strictly higher frequency.
    pub fn rank_of(&self, number: u8) -> usize {
        let own = self.count(number);
        1 + self.counts.iter().filter(|&&c| c > own).count()
    }

    /// Numbers that appeared at least once.
    pub fn observed(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn to_map(&self) -> BTreeMap<u8, u32> {
        self.iter().map(|f| (f.number, f.frequency)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{make_test_draws, RawDraw};

    fn three_draws() -> DrawSet {
        DrawSet::from_raw(&[
            RawDraw::new(1, "2024-01-01", (1..=15).collect()),
            RawDraw::new(2, "2024-01-03", (2..=16).collect()),
            RawDraw::new(3, "2024-01-05", (11..=25).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_frequency_end_to_end() {
        let table = frequencies(&three_draws());
        assert_eq!(table.count(11), 3);
        assert_eq!(table.count(1), 1);
        assert_eq!(table.count(16), 2);
        assert_eq!(table.count(25), 1);
        assert_eq!(table.draw_count(), 3);
    }

    #[test]
    fn test_frequency_total_invariant() {
        let set = make_test_draws(40);
        let table = frequencies(&set);
        assert_eq!(table.total(), (PICK_COUNT * set.len()) as u64);
    }

    #[test]
    fn test_frequency_empty() {
        let table = frequencies(&DrawSet::default());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), POOL_SIZE as usize);
        assert_eq!(table.top(), None);
        assert_eq!(table.bottom(), None);
        assert_eq!(table.relative(1), 0.0);
    }

    #[test]
    fn test_ranking_tie_break_lowest_number() {
        let table = frequencies(&three_draws());
        // 11..=15 all appear three times
        let top: Vec<u8> = table.most_frequent(5).iter().map(|f| f.number).collect();
        assert_eq!(top, vec![11, 12, 13, 14, 15]);
        assert_eq!(table.top(), Some(11));
        // 1, 17..=25 all appear once
        assert_eq!(table.bottom(), Some(1));
        let bottom: Vec<u8> = table.least_frequent(3).iter().map(|f| f.number).collect();
        assert_eq!(bottom, vec![1, 17, 18]);
    }

    #[test]
    fn test_rank_of() {
        let table = frequencies(&three_draws());
        assert_eq!(table.rank_of(11), 1);
        assert_eq!(table.rank_of(15), 1);
        // 2..=10 and 16 appear twice, behind five numbers
        assert_eq!(table.rank_of(2), 6);
        assert_eq!(table.rank_of(1), 16);
    }

    #[test]
    fn test_relative_sums_to_one() {
        let table = frequencies(&make_test_draws(12));
        let sum: f64 = (1..=POOL_SIZE).map(|n| table.relative(n)).sum();
        assert!((sum - 1.0).abs() < 1e-12, "Sum = {}", sum);
    }

    #[test]
    fn test_out_of_pool_count_is_zero() {
        let table = frequencies(&three_draws());
        assert_eq!(table.count(0), 0);
        assert_eq!(table.count(26), 0);
    }
}
