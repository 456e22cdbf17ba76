//! Perfectly Scrambled Cube Searcher
//!
//! Enumerates every physically reachable 3x3x3 Rubik's cube state in which
//! all six faces show all six colors with no two same-colored stickers
//! touching on a side or a diagonal. Solutions are appended to one output
//! file per classification bucket: the number of visually distinct face
//! patterns (1..6), plain or "perfect" (no same-color contact across face
//! seams either).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::{Parser, Subcommand};

use scrambler::corners::CornerArrangements;
use scrambler::edges::EdgeSearch;
use scrambler::face::FaceTable;
use scrambler::persistence;
use scrambler::solutions::{bucket_filename, SolutionFiles};

/// Searches for perfectly scrambled colorings of a 3x3x3 Rubik's cube.
#[derive(Parser)]
#[command(name = "scrambler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full search and append solutions to the output files.
    Search,
    /// Build and cache the lookup tables, then exit.
    Prepare,
    /// Show how many solutions the output files contain.
    Count,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None | Some(Command::Search) => run_search(),
        Some(Command::Prepare) => {
            prepare_tables();
        }
        Some(Command::Count) => run_count(),
    }
}

/// Loads the face table and corner arrangements from their caches, building
/// and re-caching whatever is missing. Cache write failures are reported
/// and ignored; everything can be rebuilt next run.
fn prepare_tables() -> (FaceTable, CornerArrangements) {
    let face_path = Path::new(persistence::FACE_TABLE_FILE);
    let table = match persistence::load_face_table(face_path) {
        Some(table) => {
            println!("Read the face table.");
            table
        }
        None => {
            println!("Building the face table.");
            let table = FaceTable::build();
            if let Err(error) = persistence::save_face_table(&table, face_path) {
                eprintln!("Failed to write {}: {error}", face_path.display());
            }
            table
        }
    };

    let corners_path = Path::new(persistence::CORNERS_FILE);
    let corners = match persistence::load_corner_arrangements(corners_path) {
        Some(corners) => {
            println!("Read the corner arrangements.");
            corners
        }
        None => {
            println!("Creating corner arrangements.");
            let corners = CornerArrangements::enumerate();
            if let Err(error) = persistence::save_corner_arrangements(&corners, corners_path) {
                eprintln!("Failed to write {}: {error}", corners_path.display());
            }
            corners
        }
    };
    println!("{} even-parity corner arrangements.", corners.even.len());
    println!("{} odd-parity corner arrangements.", corners.odd.len());

    (table, corners)
}

/// Runs the full search and prints a summary.
fn run_search() {
    let (table, corners) = prepare_tables();

    println!("Trying edge arrangements.");
    let mut sink = SolutionFiles::new(Path::new("."));
    let mut search = EdgeSearch::new(&table, &corners);
    search.run(&mut sink);

    let totals = search.totals();
    println!("{} edge arrangements.", totals.all);
    println!("{} even edge arrangements.", totals.even);
    println!("{} odd edge arrangements.", totals.odd);
    println!("Found {} solutions.", sink.total());
    for (bucket, count) in sink.counts().iter().enumerate() {
        let unique_patterns = bucket % 6 + 1;
        let perfect = bucket >= 6;
        println!("  {}: {count}", bucket_filename(unique_patterns, perfect));
    }
    if sink.rejected() > 0 {
        eprintln!("{} solutions were rejected as logic errors.", sink.rejected());
    }
}

/// Prints the number of solutions saved so far.
fn run_count() {
    let mut total = 0u64;
    for unique_patterns in 1..=6 {
        for perfect in [false, true] {
            let filename = bucket_filename(unique_patterns, perfect);
            let Ok(file) = File::open(&filename) else {
                continue;
            };
            let count = BufReader::new(file).lines().count() as u64;
            total += count;
            println!("{filename}: {count}");
        }
    }
    println!("{total} solutions");
}
