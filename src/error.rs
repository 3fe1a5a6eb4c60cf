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

use thiserror::Error;

/// Failure to build the co-occurrence index. The stage never proceeds with
/// a partial index, every score computation depends on complete denominators.
#[derive(Debug, Error)]
pub enum IndexLoadError {
    /// The co-occurrence file is unreadable or structurally invalid.
    #[error("cannot read co-occurrence data: {0}")]
    Read(#[from] csv::Error),

    /// A line the reader accepted but whose `source:target` entry or count
    /// does not parse.
    #[error("malformed co-occurrence entry at line {line}: '{content}'")]
    MalformedEntry { line: u64, content: String },
}
