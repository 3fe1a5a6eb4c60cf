use std::sync::Mutex;
use std::time::Instant;

use scoped_pool::Pool;

pub mod aggregate;
pub mod cooccurrence;
pub mod error;
pub mod io;
pub mod scoring;
pub mod stats;
pub mod types;


use crate::aggregate::ScoreAccumulator;
use crate::cooccurrence::CoOccurrenceIndex;
use crate::stats::ScoringStats;
use crate::types::{AggregatedScore, RatingRecord};

/// Score a batch of ratings against the co-occurrence index on a pool of
/// `pool_size` workers and aggregate the partial scores into one total per
/// (user, candidate item) key. Every worker joins its disjoint chunk of the
/// rating slice against the same in-memory index, so the index has to be
/// fully built before this is called. Pure with respect to its inputs,
/// re-running it on the same data produces identical totals.
pub fn score_ratings(
    ratings: &[RatingRecord],
    index: &CoOccurrenceIndex,
    pool_size: usize,
) -> (Vec<AggregatedScore>, ScoringStats) {

    let pool_size = pool_size.max(1);

    let accumulator = ScoreAccumulator::new(pool_size);
    let stats = Mutex::new(ScoringStats::default());

    let scoring_start = Instant::now();

    if !ratings.is_empty() {
        let pool = Pool::new(pool_size);
        let chunk_size = (ratings.len() + pool_size - 1) / pool_size;

        pool.scoped(|scope| {
            for chunk in ratings.chunks(chunk_size) {

                let reference_to_accumulator = &accumulator;
                let reference_to_stats = &stats;

                scope.execute(move || {
                    let mut worker_stats = ScoringStats::default();
                    let mut partials = Vec::new();

                    for rating in chunk {
                        partials.extend(scoring::partial_scores(index, rating, &mut worker_stats));
                    }

                    reference_to_accumulator.merge(aggregate::combine_partials(partials));
                    reference_to_stats.lock().unwrap().merge(&worker_stats);
                });
            }
        });

        pool.shutdown();
    }

    let stats = stats.into_inner().unwrap();

    println!(
        "{} partial scores aggregated in {}ms",
        stats.partials_emitted,
        scoring_start.elapsed().as_millis(),
    );

    (accumulator.into_scores(), stats)
}
