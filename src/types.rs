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

use serde_derive::Deserialize;

/// A single user rating, as produced by the upstream partitioning stage.
/// One record per line of the rating file, consumed exactly once.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RatingRecord {
    pub user: u32,
    pub item: u32,
    pub rating: f64,
}

/// A directed co-occurrence edge: `count` users rated both `source` and
/// `target`. An edge (A, B) does not imply existence or equal weight of
/// the edge (B, A).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoOccurrenceEdge {
    pub source: u32,
    pub target: u32,
    pub count: u32,
}

/// The contribution of one (rating, edge) pair to a candidate item,
/// already rounded to two decimal digits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartialScore {
    pub user: u32,
    pub item: u32,
    pub value: f64,
}

/// Grouping key of the aggregation: (user, candidate item).
pub type ScoreKey = (u32, u32);

/// The final total for one key. Totals are carried as exact hundredths,
/// `total_cents` is the sum of the rounded partial values times 100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregatedScore {
    pub user: u32,
    pub item: u32,
    pub total_cents: i64,
}
