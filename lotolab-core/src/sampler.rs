use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::{Combination, Draw, DrawSet, PICK_COUNT, POOL_SIZE};

/// Deterministic seed from today's date (YYYYMMDD).
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

/// Fixed seed when given, fresh OS-seeded generator otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Uniformly picks `count` distinct entries of `pool`, in pick order.
/// Takes the whole pool when `count` exceeds its length.
pub fn sample_without_replacement<R: Rng + ?Sized>(pool: &[u8], count: usize, rng: &mut R) -> Vec<u8> {
    let mut available = pool.to_vec();
    let mut selected = Vec::with_capacity(count.min(pool.len()));

    for _ in 0..count {
        if available.is_empty() {
            break;
        }
        let idx = rng.random_range(0..available.len());
        selected.push(available.remove(idx));
    }

    selected
}

/// Synthetic history of uniform 15-of-25 draws, three days apart.
pub fn simulate_draws<R: Rng + ?Sized>(
    count: usize,
    first_id: u32,
    first_date: NaiveDate,
    rng: &mut R,
) -> Result<DrawSet> {
    let pool: Vec<u8> = (1..=POOL_SIZE).collect();
    let draws = (0..count)
        .map(|i| {
            let numbers = sample_without_replacement(&pool, PICK_COUNT, rng);
            let combination = Combination::try_from(numbers.as_slice())?;
            let date = first_date + Duration::days(3 * i as i64);
            Ok(Draw::new(first_id + i as u32, date, combination))
        })
        .collect::<Result<Vec<_>>>()?;
    DrawSet::new(draws)
}
