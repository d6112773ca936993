use serde::Serialize;

use crate::models::{DrawSet, POOL_SIZE};

/// Gaps between successive appearances of one number, in draw-index units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalRecord {
    pub gaps: Vec<u32>,
    /// Draws elapsed since the last appearance, as of the most recent draw.
    pub last_seen_gap: Option<u32>,
}

impl IntervalRecord {
    pub fn mean_gap(&self) -> Option<f64> {
        if self.gaps.is_empty() {
            return None;
        }
        Some(self.gaps.iter().map(|&g| g as f64).sum::<f64>() / self.gaps.len() as f64)
    }

    pub fn max_gap(&self) -> Option<u32> {
        self.gaps.iter().copied().max()
    }

    /// Population standard deviation of the gaps.
    pub fn std_gap(&self) -> Option<f64> {
        let mean = self.mean_gap()?;
        let variance = self
            .gaps
            .iter()
            .map(|&g| (g as f64 - mean).powi(2))
            .sum::<f64>()
            / self.gaps.len() as f64;
        Some(variance.sqrt())
    }

    pub fn summary(&self) -> IntervalSummary {
        IntervalSummary {
            mean_gap: self.mean_gap(),
            max_gap: self.max_gap(),
            last_seen_gap: self.last_seen_gap,
        }
    }
}

/// Report view of an interval record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalSummary {
    pub mean_gap: Option<f64>,
    pub max_gap: Option<u32>,
    pub last_seen_gap: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    records: Vec<IntervalRecord>,
}

impl IntervalTable {
    pub fn get(&self, number: u8) -> Option<&IntervalRecord> {
        match number {
            1..=POOL_SIZE => self.records.get((number - 1) as usize),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &IntervalRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (i as u8 + 1, r))
    }
}

/// Walks the draws oldest first; a number seen at index `last` and again at
/// `i` records a gap of `i - last`.
pub fn intervals(draws: &DrawSet) -> IntervalTable {
    let size = POOL_SIZE as usize;
    let mut records = vec![IntervalRecord::default(); size];
    let mut last_seen: Vec<Option<usize>> = vec![None; size];

    for (i, draw) in draws.chronological().iter().enumerate() {
        for &n in draw.numbers().numbers() {
            let idx = (n - 1) as usize;
            if let Some(prev) = last_seen[idx] {
                records[idx].gaps.push((i - prev) as u32);
            }
            last_seen[idx] = Some(i);
        }
    }

    if let Some(last_index) = draws.len().checked_sub(1) {
        for (record, seen) in records.iter_mut().zip(&last_seen) {
            record.last_seen_gap = seen.map(|s| (last_index - s) as u32);
        }
    }

    tracing::debug!(draws = draws.len(), "interval pass complete");
    IntervalTable { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{make_test_draws, RawDraw};

    fn with_one(id: u32, has_one: bool) -> RawDraw {
        let numbers: Vec<i64> = if has_one { (1..=15).collect() } else { (11..=25).collect() };
        RawDraw::new(id, format!("2024-02-{:02}", id), numbers)
    }

    #[test]
    fn test_gaps_and_last_seen() {
        // 1 appears at indices 0, 1, 4 out of 6 draws
        let set = DrawSet::from_raw(&[
            with_one(1, true),
            with_one(2, true),
            with_one(3, false),
            with_one(4, false),
            with_one(5, true),
            with_one(6, false),
        ])
        .unwrap();
        let table = intervals(&set);
        let one = table.get(1).unwrap();
        assert_eq!(one.gaps, vec![1, 3]);
        assert_eq!(one.last_seen_gap, Some(1));
        assert_eq!(one.max_gap(), Some(3));
        assert!((one.mean_gap().unwrap() - 2.0).abs() < 1e-12);
        assert!((one.std_gap().unwrap() - 1.0).abs() < 1e-12);

        // 11..=15 appear in every draw
        let eleven = table.get(11).unwrap();
        assert_eq!(eleven.gaps, vec![1; 5]);
        assert_eq!(eleven.last_seen_gap, Some(0));
    }

    #[test]
    fn test_input_order_irrelevant() {
        let forward = vec![with_one(1, true), with_one(2, false), with_one(3, true)];
        let mut backward = forward.clone();
        backward.reverse();
        let a = intervals(&DrawSet::from_raw(&forward).unwrap());
        let b = intervals(&DrawSet::from_raw(&backward).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.get(1).unwrap().gaps, vec![2]);
    }

    #[test]
    fn test_single_appearance_has_no_gaps() {
        let set = DrawSet::from_raw(&[with_one(1, true), with_one(2, false)]).unwrap();
        let table = intervals(&set);
        let one = table.get(1).unwrap();
        assert!(one.gaps.is_empty());
        assert_eq!(one.mean_gap(), None);
        assert_eq!(one.last_seen_gap, Some(1));
    }

    #[test]
    fn test_never_seen() {
        let set = DrawSet::from_raw(&[with_one(1, false)]).unwrap();
        let table = intervals(&set);
        let summary = table.get(1).unwrap().summary();
        assert_eq!(summary.last_seen_gap, None);
        assert_eq!(summary.max_gap, None);
    }

    #[test]
    fn test_empty_set() {
        let table = intervals(&DrawSet::default());
        assert_eq!(table.iter().count(), 25);
        assert!(table.iter().all(|(_, r)| r.gaps.is_empty() && r.last_seen_gap.is_none()));
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_gaps_positive() {
        let table = intervals(&make_test_draws(50));
        for (number, record) in table.iter() {
            assert!(record.gaps.iter().all(|&g| g > 0), "zero gap for {}", number);
        }
    }
}
