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

use std::fs::File;
use std::io::{self, stdout, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::types::{AggregatedScore, RatingRecord};

/// Reads a rating input file. We expect NO headers, and a `user,item,rating`
/// triple per line with comma separation.
pub fn ratings_reader(file: &str) -> Result<csv::Reader<File>, csv::Error> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_path(file)?;

    Ok(reader)
}

/// Decode all well-formed rating records. A line that fails to parse is
/// skipped and counted, one bad record must not block the others.
pub fn read_ratings<R>(reader: &mut csv::Reader<R>) -> (Vec<RatingRecord>, u64)
where
    R: Read,
{
    let mut ratings = Vec::new();
    let mut num_skipped: u64 = 0;

    for result in reader.deserialize() {
        match result {
            Ok(rating) => ratings.push(rating),
            Err(_) => num_skipped += 1,
        }
    }

    (ratings, num_skipped)
}

/// Output the aggregated scores as `user<TAB>candidateItem:totalScore`
/// lines, total formatted to two decimal digits. If a `scores_path` is
/// supplied, we write to a file at the specified path, otherwise, we output
/// to stdout.
pub fn write_scores(
    scores: &[AggregatedScore],
    scores_path: Option<String>,
) -> io::Result<()> {

    let mut out: Box<dyn Write> = match scores_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    write_scores_to(&mut out, scores)
}

pub fn write_scores_to<W: Write>(out: &mut W, scores: &[AggregatedScore]) -> io::Result<()> {
    for score in scores {
        write!(out, "{}\t{}:{}\n", score.user, score.item, format_cents(score.total_cents))?;
    }

    Ok(())
}

/// Totals are exact hundredths, formatting from the integer representation
/// keeps both decimal digits exact.
fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.abs();

    format!("{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
}
