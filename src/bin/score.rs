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

use std::env;
use std::error::Error;
use std::process;

use getopts::Options;
use serde_json::json;

use recoscore::cooccurrence::CoOccurrenceIndex;
use recoscore::io;

fn main() {

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("c", "cooccurrences", "Co-occurrence matrix file name (required). One \
        sourceItem:targetItem pair and its co-occurrence count per line, separated by a \
        tab.", "PATH");
    opts.optopt("r", "ratings", "Rating input file name (required). One user,item,rating \
        triple per line, comma separated.", "PATH");
    opts.optopt("o", "outputfile", "Output file name (optional, scores will be written to \
        stdout by default).", "PATH");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    if !matches.opt_present("c") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify a co-occurrence matrix file via --cooccurrences."),
        );
    }

    if !matches.opt_present("r") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify a rating input file via --ratings."),
        );
    }

    let cooccurrences_path = matches.opt_str("c").unwrap();
    let ratings_path = matches.opt_str("r").unwrap();
    let scores_path = matches.opt_str("o");

    if let Err(failure) = compute_scores(&cooccurrences_path, &ratings_path, scores_path) {
        eprintln!("Stage failed: {}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
}

fn compute_scores(
    cooccurrences_path: &str,
    ratings_path: &str,
    scores_path: Option<String>,
) -> Result<(), Box<dyn Error>> {

    println!("Reading co-occurrence matrix from {}", cooccurrences_path);

    let index = CoOccurrenceIndex::from_path(cooccurrences_path)?;

    println!(
        "Indexed {} co-occurrence edges for {} items.",
        index.num_edges(),
        index.num_source_items(),
    );

    println!("Reading ratings from {}", ratings_path);

    let mut reader = io::ratings_reader(ratings_path)?;
    let (ratings, num_skipped) = io::read_ratings(&mut reader);

    println!("Found {} ratings ({} malformed lines skipped).", ratings.len(), num_skipped);

    let (scores, mut stats) = recoscore::score_ratings(&ratings, &index, num_cpus::get());

    stats.records_skipped = num_skipped;
    stats.scores_written = scores.len() as u64;

    println!("Writing scores...");
    io::write_scores(&scores, scores_path)?;

    println!("{}", json!(stats).to_string());

    Ok(())
}
