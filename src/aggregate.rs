use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use fnv::{FnvHashMap, FnvHasher};

use crate::types::{AggregatedScore, PartialScore, ScoreKey};

/// Partial score values are exact multiples of 0.01 after rounding. Carrying
/// them as integer hundredths makes the summation associative and
/// commutative, the totals cannot depend on arrival order or partitioning.
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Local combiner: fold a multiset of partial scores into per-key sums.
pub fn combine_partials<I>(partials: I) -> FnvHashMap<ScoreKey, i64>
where
    I: IntoIterator<Item = PartialScore>,
{
    let mut combined = FnvHashMap::default();

    for partial in partials {
        *combined.entry((partial.user, partial.item)).or_insert(0) += to_cents(partial.value);
    }

    combined
}

/// The shuffle boundary between scoring and aggregation. Keys are routed to
/// shards by hash, so all partial sums for one key end up in exactly one
/// shard; no key can be split across aggregation units.
pub struct ScoreAccumulator {
    shards: Vec<Mutex<FnvHashMap<ScoreKey, i64>>>,
}

impl ScoreAccumulator {

    pub fn new(num_shards: usize) -> ScoreAccumulator {
        let num_shards = num_shards.max(1);

        let mut shards = Vec::with_capacity(num_shards);
        for _ in 0..num_shards {
            shards.push(Mutex::new(FnvHashMap::default()));
        }

        ScoreAccumulator { shards }
    }

    fn shard_index(&self, key: &ScoreKey) -> usize {
        let mut hasher = FnvHasher::default();
        key.hash(&mut hasher);

        (hasher.finish() % self.shards.len() as u64) as usize
    }

    /// Merge a worker's combined partial sums into the shards. Entries are
    /// grouped by shard first so each shard is locked at most once per call.
    pub fn merge(&self, combined: FnvHashMap<ScoreKey, i64>) {
        let mut routed: Vec<Vec<(ScoreKey, i64)>> = vec![Vec::new(); self.shards.len()];

        for (key, cents) in combined {
            let shard = self.shard_index(&key);
            routed[shard].push((key, cents));
        }

        for (shard, entries) in routed.into_iter().enumerate() {
            if entries.is_empty() {
                continue;
            }

            let mut totals = self.shards[shard].lock().unwrap();
            for (key, cents) in entries {
                *totals.entry(key).or_insert(0) += cents;
            }
        }
    }

    /// Drain all shards into the final totals, sorted by key so repeated
    /// runs write identical output no matter how work was scheduled.
    pub fn into_scores(self) -> Vec<AggregatedScore> {
        let mut scores = Vec::new();

        for shard in self.shards {
            let totals = shard.into_inner().unwrap();
            for ((user, item), total_cents) in totals {
                scores.push(AggregatedScore { user, item, total_cents });
            }
        }

        scores.sort_by_key(|score| (score.user, score.item));

        scores
    }
}
