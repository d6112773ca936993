use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analysis::FrequencyTable;
use crate::error::{LotoError, Result};
use crate::models::{Combination, PICK_COUNT, POOL_SIZE};
use crate::sampler::sample_without_replacement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Frequent,
    Medium,
    Infrequent,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Frequent => write!(f, "frequent"),
            Tier::Medium => write!(f, "medium"),
            Tier::Infrequent => write!(f, "infrequent"),
        }
    }
}

/// Tier sizes and how many numbers each combination takes from each tier.
/// The medium tier supplies whatever the other two leave of the 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierQuota {
    pub frequent_tier: usize,
    pub frequent_picks: usize,
    pub infrequent_tier: usize,
    pub infrequent_picks: usize,
}

impl Default for TierQuota {
    fn default() -> Self {
        Self {
            frequent_tier: 10,
            frequent_picks: 9,
            infrequent_tier: 5,
            infrequent_picks: 2,
        }
    }
}

impl TierQuota {
    pub fn medium_picks(&self) -> usize {
        PICK_COUNT.saturating_sub(self.frequent_picks + self.infrequent_picks)
    }

    pub fn validate(&self) -> Result<()> {
        let pool = POOL_SIZE as usize;
        if self.frequent_picks + self.infrequent_picks > PICK_COUNT {
            return Err(LotoError::InvalidConfig(format!(
                "frequent ({}) and infrequent ({}) picks exceed {}",
                self.frequent_picks, self.infrequent_picks, PICK_COUNT
            )));
        }
        if self.frequent_tier + self.infrequent_tier > pool {
            return Err(LotoError::InvalidConfig(format!(
                "tier sizes {} + {} exceed the {}-number pool",
                self.frequent_tier, self.infrequent_tier, pool
            )));
        }
        Ok(())
    }
}

/// Disjoint frequency classes, each listed in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tiers {
    pub frequent: Vec<u8>,
    pub medium: Vec<u8>,
    pub infrequent: Vec<u8>,
}

impl Tiers {
    fn get(&self, tier: Tier) -> &[u8] {
        match tier {
            Tier::Frequent => &self.frequent,
            Tier::Medium => &self.medium,
            Tier::Infrequent => &self.infrequent,
        }
    }
}

/// Frequent: the `frequent_tier` highest ranked numbers.
/// Infrequent: the `infrequent_tier` lowest ranked numbers outside the frequent tier.
/// Medium: every other number drawn at least once.
pub fn partition_tiers(table: &FrequencyTable, quota: &TierQuota) -> Tiers {
    let frequent: Vec<u8> = table
        .ranking()
        .iter()
        .take(quota.frequent_tier)
        .map(|f| f.number)
        .collect();
    let infrequent: Vec<u8> = table
        .ascending_ranking()
        .iter()
        .map(|f| f.number)
        .filter(|n| !frequent.contains(n))
        .take(quota.infrequent_tier)
        .collect();
    let medium: Vec<u8> = table
        .ranking()
        .iter()
        .filter(|f| f.frequency > 0)
        .map(|f| f.number)
        .filter(|n| !frequent.contains(n) && !infrequent.contains(n))
        .collect();

    Tiers {
        frequent,
        medium,
        infrequent,
    }
}

/// Builds `count` combinations, each mixing the three frequency tiers
/// according to `quota`. The caller owns the generator.
pub fn recommend<R: Rng + ?Sized>(
    table: &FrequencyTable,
    count: usize,
    quota: &TierQuota,
    rng: &mut R,
) -> Result<Vec<Combination>> {
    if table.draw_count() == 0 {
        return Err(LotoError::InsufficientData { required: 1, actual: 0 });
    }
    quota.validate()?;

    let tiers = partition_tiers(table, quota);
    let plan = [
        (Tier::Frequent, quota.frequent_picks),
        (Tier::Medium, quota.medium_picks()),
        (Tier::Infrequent, quota.infrequent_picks),
    ];
    for &(tier, required) in &plan {
        let available = tiers.get(tier).len();
        if available < required {
            return Err(LotoError::InsufficientPoolSize {
                tier,
                required,
                available,
            });
        }
    }

    let mut combinations = Vec::with_capacity(count);
    for _ in 0..count {
        let mut numbers = Vec::with_capacity(PICK_COUNT);
        for &(tier, picks) in &plan {
            numbers.extend(sample_without_replacement(tiers.get(tier), picks, rng));
        }
        combinations.push(Combination::try_from(numbers.as_slice())?);
    }

    tracing::debug!(
        count,
        frequent = tiers.frequent.len(),
        medium = tiers.medium.len(),
        infrequent = tiers.infrequent.len(),
        "recommendations generated"
    );
    Ok(combinations)
}

/// Same as [`recommend`] with a generator local to this call.
pub fn recommend_seeded(
    table: &FrequencyTable,
    count: usize,
    quota: &TierQuota,
    seed: u64,
) -> Result<Vec<Combination>> {
    let mut rng = StdRng::seed_from_u64(seed);
    recommend(table, count, quota, &mut rng)
}
