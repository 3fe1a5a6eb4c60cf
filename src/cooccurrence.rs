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

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use fnv::FnvHashMap;

use crate::error::IndexLoadError;
use crate::types::CoOccurrenceEdge;

/// The complete co-occurrence matrix, grouped by source item, together with
/// the per-item row sums used as normalization denominators. Built once
/// before any rating is scored and shared read-only with every worker; it is
/// an explicitly constructed value, scoring calls receive it by reference.
pub struct CoOccurrenceIndex {
    edges: FnvHashMap<u32, Vec<CoOccurrenceEdge>>,
    denominators: FnvHashMap<u32, u64>,
}

impl CoOccurrenceIndex {

    /// Load the full matrix from a file of `sourceItem:targetItem<TAB>count`
    /// lines. Any malformed line fails the build, a partial index must
    /// never be scored against.
    pub fn from_path(path: &str) -> Result<CoOccurrenceIndex, IndexLoadError> {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_path(path)?;

        CoOccurrenceIndex::from_reader(reader)
    }

    pub fn from_reader<R: Read>(
        mut reader: csv::Reader<R>,
    ) -> Result<CoOccurrenceIndex, IndexLoadError> {

        let mut edges: FnvHashMap<u32, Vec<CoOccurrenceEdge>> = FnvHashMap::default();

        for result in reader.records() {
            let record = result?;

            let edge = match parse_edge(&record) {
                Some(edge) => edge,
                None => {
                    return Err(IndexLoadError::MalformedEntry {
                        line: record.position().map(|position| position.line()).unwrap_or(0),
                        content: record.iter().collect::<Vec<&str>>().join("\t"),
                    });
                },
            };

            edges.entry(edge.source).or_insert_with(Vec::new).push(edge);
        }

        // Denominators are derived only once grouping is finished; the row
        // sum of a source item has to cover its complete edge set.
        let denominators = edges
            .iter()
            .map(|(source, edges_of_source)| {
                let row_sum = edges_of_source
                    .iter()
                    .map(|edge| u64::from(edge.count))
                    .sum();
                (*source, row_sum)
            })
            .collect();

        Ok(CoOccurrenceIndex { edges, denominators })
    }

    /// All edges whose source is `item`, in file order. `None` for an item
    /// the matrix has no row for.
    pub fn edges_for(&self, item: u32) -> Option<&[CoOccurrenceEdge]> {
        self.edges.get(&item).map(|edges| edges.as_slice())
    }

    /// The sum of counts over all edges whose source is `item`.
    pub fn denominator(&self, item: u32) -> Option<u64> {
        self.denominators.get(&item).cloned()
    }

    pub fn num_source_items(&self) -> usize {
        self.edges.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.values().map(|edges| edges.len()).sum()
    }
}

fn parse_edge(record: &StringRecord) -> Option<CoOccurrenceEdge> {
    if record.len() != 2 {
        return None;
    }

    let mut item_pair = record[0].splitn(2, ':');

    let source = item_pair.next()?.trim().parse().ok()?;
    let target = item_pair.next()?.trim().parse().ok()?;
    let count = record[1].trim().parse().ok()?;

    Some(CoOccurrenceEdge { source, target, count })
}

#[cfg(test)]
mod tests {

    use csv::ReaderBuilder;

    use crate::cooccurrence::CoOccurrenceIndex;
    use crate::error::IndexLoadError;

    fn index_from(data: &str) -> Result<CoOccurrenceIndex, IndexLoadError> {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_reader(data.as_bytes());

        CoOccurrenceIndex::from_reader(reader)
    }

    #[test]
    fn edges_grouped_by_source() {
        let index = index_from("1:2\t8\n1:3\t5\n2:1\t8\n3:1\t5\n").unwrap();

        assert_eq!(index.num_source_items(), 3);
        assert_eq!(index.num_edges(), 4);

        let edges_of_one = index.edges_for(1).unwrap();
        assert_eq!(edges_of_one.len(), 2);
        assert_eq!(edges_of_one[0].target, 2);
        assert_eq!(edges_of_one[0].count, 8);
        assert_eq!(edges_of_one[1].target, 3);
        assert_eq!(edges_of_one[1].count, 5);

        assert!(index.edges_for(99).is_none());
    }

    #[test]
    fn denominator_is_row_sum_over_complete_edge_set() {
        let index = index_from("1:2\t8\n1:3\t5\n2:1\t8\n3:1\t5\n").unwrap();

        assert_eq!(index.denominator(1), Some(13));
        assert_eq!(index.denominator(2), Some(8));
        assert_eq!(index.denominator(3), Some(5));
        assert_eq!(index.denominator(4), None);
    }

    #[test]
    fn empty_input_yields_empty_index() {
        let index = index_from("").unwrap();

        assert_eq!(index.num_source_items(), 0);
        assert_eq!(index.num_edges(), 0);
    }

    #[test]
    fn missing_separator_fails_the_build() {
        match index_from("1:2\t8\n1-3\t5\n") {
            Err(IndexLoadError::MalformedEntry { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "1-3\t5");
            },
            Err(other) => panic!("unexpected failure: {}", other),
            Ok(_) => panic!("malformed entry must fail the build"),
        }
    }

    #[test]
    fn non_numeric_fields_fail_the_build() {
        assert!(index_from("1:x\t8\n").is_err());
        assert!(index_from("1:2\teight\n").is_err());
        assert!(index_from("a:2\t8\n").is_err());
    }

    #[test]
    fn extra_pair_component_fails_the_build() {
        assert!(index_from("1:2:3\t8\n").is_err());
    }
}
