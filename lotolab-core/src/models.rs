use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LotoError, Result};

/// Numbers run from 1 to POOL_SIZE.
pub const POOL_SIZE: u8 = 25;
/// Numbers drawn per contest.
pub const PICK_COUNT: usize = 15;
/// Highest number of the low half (1..=12); 13..=25 is the high half.
pub const LOW_MAX: u8 = 12;

/// One draw record as handed over by the ingestion layer, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDraw {
    pub id: u32,
    pub date: String,
    pub numbers: Vec<i64>,
}

impl RawDraw {
    pub fn new(id: u32, date: impl Into<String>, numbers: Vec<i64>) -> Self {
        Self {
            id,
            date: date.into(),
            numbers,
        }
    }
}

/// Exactly 15 distinct numbers in 1..=25, kept sorted ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>")]
pub struct Combination([u8; PICK_COUNT]);

impl Combination {
    /// Validates a caller-supplied candidate.
    pub fn new(numbers: &[i64]) -> Result<Self> {
        validate_numbers("candidate", numbers).map(Combination)
    }

    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.0
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }

    /// Count of numbers shared with another combination.
    pub fn overlap(&self, other: &Combination) -> usize {
        self.0.iter().filter(|&&n| other.contains(n)).count()
    }
}

impl TryFrom<Vec<i64>> for Combination {
    type Error = LotoError;

    fn try_from(numbers: Vec<i64>) -> Result<Self> {
        Combination::new(&numbers)
    }
}

impl TryFrom<&[u8]> for Combination {
    type Error = LotoError;

    fn try_from(numbers: &[u8]) -> Result<Self> {
        let widened: Vec<i64> = numbers.iter().map(|&n| n as i64).collect();
        Combination::new(&widened)
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| format!("{:02}", n)).collect();
        write!(f, "{}", parts.join(" "))
    }
}

fn validate_numbers(context: &str, numbers: &[i64]) -> Result<[u8; PICK_COUNT]> {
    if numbers.len() != PICK_COUNT {
        return Err(LotoError::malformed(
            context,
            format!("expected {} numbers, got {}", PICK_COUNT, numbers.len()),
        ));
    }
    for &n in numbers {
        if n < 1 || n > POOL_SIZE as i64 {
            return Err(LotoError::malformed(
                context,
                format!("number {} out of range (1-{})", n, POOL_SIZE),
            ));
        }
    }
    let mut seen = HashSet::with_capacity(PICK_COUNT);
    for &n in numbers {
        if !seen.insert(n) {
            return Err(LotoError::malformed(context, format!("duplicate number {}", n)));
        }
    }

    let mut sorted = [0u8; PICK_COUNT];
    for (slot, &n) in sorted.iter_mut().zip(numbers) {
        *slot = n as u8;
    }
    sorted.sort_unstable();
    Ok(sorted)
}

/// One validated historical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    id: u32,
    date: NaiveDate,
    numbers: Combination,
}

impl Draw {
    pub fn new(id: u32, date: NaiveDate, numbers: Combination) -> Self {
        Self { id, date, numbers }
    }

    pub fn from_raw(raw: &RawDraw) -> Result<Self> {
        let context = format!("draw {}", raw.id);
        let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d")
            .map_err(|e| LotoError::malformed(&context, format!("invalid date '{}': {}", raw.date, e)))?;
        let numbers = validate_numbers(&context, &raw.numbers)?;
        Ok(Self {
            id: raw.id,
            date,
            numbers: Combination(numbers),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn numbers(&self) -> &Combination {
        &self.numbers
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(number)
    }
}

/// Immutable, id-ordered collection of draws.
///
/// Stored oldest first. Display code walks `recent_first()`; gap and
/// repetition computations walk `chronological()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawSet {
    draws: Vec<Draw>,
}

impl DrawSet {
    pub fn new(mut draws: Vec<Draw>) -> Result<Self> {
        draws.sort_by_key(|d| d.id);
        if let Some(pair) = draws.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(LotoError::malformed(
                format!("draw {}", pair[1].id),
                "duplicate contest id",
            ));
        }
        Ok(Self { draws })
    }

    pub fn from_raw(records: &[RawDraw]) -> Result<Self> {
        let draws = records
            .iter()
            .map(Draw::from_raw)
            .collect::<Result<Vec<_>>>()?;
        let set = Self::new(draws)?;
        tracing::debug!(draws = set.len(), "draw set built");
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Oldest first.
    pub fn chronological(&self) -> &[Draw] {
        &self.draws
    }

    /// Most recent first.
    pub fn recent_first(&self) -> impl Iterator<Item = &Draw> {
        self.draws.iter().rev()
    }

    pub fn latest_draw(&self) -> Option<&Draw> {
        self.draws.last()
    }

    /// Derived set holding the `n` most recent draws.
    pub fn latest(&self, n: usize) -> DrawSet {
        let start = self.draws.len().saturating_sub(n);
        DrawSet {
            draws: self.draws[start..].to_vec(),
        }
    }

    /// Lowest and highest contest id.
    pub fn id_range(&self) -> Option<(u32, u32)> {
        match (self.draws.first(), self.draws.last()) {
            (Some(first), Some(last)) => Some((first.id, last.id)),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn make_test_draws(n: usize) -> DrawSet {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let records: Vec<RawDraw> = (0..n)
        .map(|i| {
            let numbers = (0..PICK_COUNT)
                .map(|k| ((i * 3 + k) % POOL_SIZE as usize) as i64 + 1)
                .collect();
            let date = start + chrono::Duration::days(2 * i as i64);
            RawDraw::new(i as u32 + 1, date.format("%Y-%m-%d").to_string(), numbers)
        })
        .collect();
    DrawSet::from_raw(&records).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(range: std::ops::RangeInclusive<i64>) -> Vec<i64> {
        range.collect()
    }

    #[test]
    fn test_combination_ok() {
        let c = Combination::new(&[25, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]).unwrap();
        assert_eq!(c.numbers()[0], 1);
        assert_eq!(c.numbers()[14], 25);
        assert!(c.contains(25));
        assert!(!c.contains(15));
    }

    #[test]
    fn test_combination_wrong_count() {
        let err = Combination::new(&numbers(1..=14)).unwrap_err();
        assert_eq!(err.code(), "malformed_draw");
        assert!(Combination::new(&numbers(1..=16)).is_err());
    }

    #[test]
    fn test_combination_out_of_range() {
        let mut nums = numbers(1..=14);
        nums.push(26);
        assert!(Combination::new(&nums).is_err());

        let mut nums = numbers(2..=15);
        nums.push(0);
        assert!(Combination::new(&nums).is_err());

        let mut nums = numbers(2..=15);
        nums.push(-3);
        assert!(Combination::new(&nums).is_err());
    }

    #[test]
    fn test_combination_duplicate() {
        let mut nums = numbers(1..=14);
        nums.push(7);
        let err = Combination::new(&nums).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn test_combination_overlap() {
        let a = Combination::new(&numbers(1..=15)).unwrap();
        let b = Combination::new(&numbers(11..=25)).unwrap();
        assert_eq!(a.overlap(&b), 5);
        assert_eq!(a.overlap(&a), 15);
    }

    #[test]
    fn test_combination_deserialize_validates() {
        let ok: Combination = serde_json::from_str("[1,2,3,4,5,6,7,8,9,10,11,12,13,14,15]").unwrap();
        assert_eq!(ok.numbers()[14], 15);
        assert!(serde_json::from_str::<Combination>("[1,2,3]").is_err());
    }

    #[test]
    fn test_draw_from_raw_bad_date() {
        let raw = RawDraw::new(7, "17/02/2026", numbers(1..=15));
        let err = Draw::from_raw(&raw).unwrap_err();
        assert!(err.to_string().contains("draw 7"), "{err}");
    }

    #[test]
    fn test_draw_set_rejects_malformed() {
        let records = vec![
            RawDraw::new(1, "2024-01-01", numbers(1..=15)),
            RawDraw::new(2, "2024-01-03", numbers(1..=14)),
        ];
        let err = DrawSet::from_raw(&records).unwrap_err();
        assert!(err.to_string().contains("draw 2"), "{err}");
    }

    #[test]
    fn test_draw_set_duplicate_id() {
        let records = vec![
            RawDraw::new(5, "2024-01-01", numbers(1..=15)),
            RawDraw::new(5, "2024-01-03", numbers(11..=25)),
        ];
        let err = DrawSet::from_raw(&records).unwrap_err();
        assert_eq!(err.code(), "malformed_draw");
    }

    #[test]
    fn test_draw_set_empty() {
        let set = DrawSet::from_raw(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.id_range(), None);
    }

    #[test]
    fn test_draw_set_order() {
        let records = vec![
            RawDraw::new(3, "2024-01-05", numbers(1..=15)),
            RawDraw::new(1, "2024-01-01", numbers(1..=15)),
            RawDraw::new(2, "2024-01-03", numbers(1..=15)),
        ];
        let set = DrawSet::from_raw(&records).unwrap();
        let ids: Vec<u32> = set.chronological().iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let recent: Vec<u32> = set.recent_first().map(|d| d.id()).collect();
        assert_eq!(recent, vec![3, 2, 1]);
        assert_eq!(set.id_range(), Some((1, 3)));
        assert_eq!(set.latest_draw().map(|d| d.id()), Some(3));
    }

    #[test]
    fn test_draw_set_latest() {
        let set = make_test_draws(10);
        let last = set.latest(3);
        assert_eq!(last.len(), 3);
        assert_eq!(last.id_range(), Some((8, 10)));
        assert_eq!(set.latest(50).len(), 10);
        assert!(set.latest(0).is_empty());
    }

    #[test]
    fn test_make_test_draws_valid() {
        let set = make_test_draws(30);
        assert_eq!(set.len(), 30);
        for draw in set.chronological() {
            assert_eq!(draw.numbers().numbers().len(), PICK_COUNT);
        }
    }
}
