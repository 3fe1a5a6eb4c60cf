/**
 * RecoScore
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use crate::cooccurrence::CoOccurrenceIndex;
use crate::stats::ScoringStats;
use crate::types::{PartialScore, RatingRecord};

/// Round to two decimal digits, half-up, matching the fixed two-decimal
/// output format.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one rating against the shared index: fan the rating out over all
/// edges of its item and emit one normalized partial score per edge. An
/// item without a row in the matrix contributes nothing, as does an edge
/// whose target item has no denominator; both conditions are counted, never
/// failed, one odd record must not block the rest of the stream.
pub fn partial_scores(
    index: &CoOccurrenceIndex,
    rating: &RatingRecord,
    stats: &mut ScoringStats,
) -> Vec<PartialScore> {

    stats.ratings_scored += 1;

    let edges = match index.edges_for(rating.item) {
        Some(edges) => edges,
        None => {
            stats.items_without_edges += 1;
            return Vec::new();
        },
    };

    let mut partials = Vec::with_capacity(edges.len());

    for edge in edges {
        // Normalization divides by the row sum of the edge's target item,
        // the convention the upstream matrix builder pairs with.
        let denominator = match index.denominator(edge.target) {
            Some(denominator) if denominator > 0 => denominator,
            _ => {
                stats.missing_denominators += 1;
                continue;
            },
        };

        let raw = rating.rating * f64::from(edge.count);
        let value = round2(raw / denominator as f64);

        partials.push(PartialScore { user: rating.user, item: edge.target, value });
    }

    stats.partials_emitted += partials.len() as u64;

    partials
}

#[cfg(test)]
mod tests {

    use csv::ReaderBuilder;

    use crate::cooccurrence::CoOccurrenceIndex;
    use crate::scoring::{partial_scores, round2};
    use crate::stats::ScoringStats;
    use crate::types::RatingRecord;

    fn index_from(data: &str) -> CoOccurrenceIndex {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_reader(data.as_bytes());

        CoOccurrenceIndex::from_reader(reader).unwrap()
    }

    fn within_epsilon(value: f64, expected: f64) -> bool {
        (value - expected).abs() < 1e-9
    }

    #[test]
    fn rounds_half_up_at_two_decimals() {
        assert!(within_epsilon(round2(0.125), 0.13));
        assert!(within_epsilon(round2(0.1049), 0.10));
        assert!(within_epsilon(round2(10.0 / 13.0), 0.77));
        assert!(within_epsilon(round2(5.0), 5.0));
    }

    #[test]
    fn one_rating_fans_out_over_all_edges_of_its_item() {
        let index = index_from("1:2\t8\n1:3\t5\n2:1\t8\n3:1\t5\n");
        let rating = RatingRecord { user: 100, item: 1, rating: 5.0 };
        let mut stats = ScoringStats::default();

        let partials = partial_scores(&index, &rating, &mut stats);

        // 5.0 * 8 / denominator(2) and 5.0 * 5 / denominator(3)
        assert_eq!(partials.len(), 2);
        assert_eq!(partials[0].user, 100);
        assert_eq!(partials[0].item, 2);
        assert!(within_epsilon(partials[0].value, 5.0));
        assert_eq!(partials[1].item, 3);
        assert!(within_epsilon(partials[1].value, 5.0));

        assert_eq!(stats.ratings_scored, 1);
        assert_eq!(stats.partials_emitted, 2);
        assert_eq!(stats.items_without_edges, 0);
    }

    #[test]
    fn normalizes_by_the_target_items_row_sum() {
        let index = index_from("1:2\t8\n1:3\t5\n2:1\t8\n3:1\t5\n");
        let rating = RatingRecord { user: 100, item: 3, rating: 2.0 };
        let mut stats = ScoringStats::default();

        let partials = partial_scores(&index, &rating, &mut stats);

        // 2.0 * 5 / denominator(1), denominator(1) = 8 + 5
        assert_eq!(partials.len(), 1);
        assert_eq!(partials[0].item, 1);
        assert!(within_epsilon(partials[0].value, 0.77));
    }

    #[test]
    fn item_without_edges_contributes_nothing() {
        let index = index_from("1:2\t8\n2:1\t8\n");
        let rating = RatingRecord { user: 100, item: 42, rating: 3.5 };
        let mut stats = ScoringStats::default();

        let partials = partial_scores(&index, &rating, &mut stats);

        assert!(partials.is_empty());
        assert_eq!(stats.items_without_edges, 1);
        assert_eq!(stats.partials_emitted, 0);
    }

    #[test]
    fn edge_without_target_denominator_is_skipped_and_counted() {
        // item 2 never occurs as a source, its row sum does not exist
        let index = index_from("1:2\t8\n");
        let rating = RatingRecord { user: 100, item: 1, rating: 5.0 };
        let mut stats = ScoringStats::default();

        let partials = partial_scores(&index, &rating, &mut stats);

        assert!(partials.is_empty());
        assert_eq!(stats.missing_denominators, 1);
        assert_eq!(stats.ratings_scored, 1);
    }
}
