//! Classification and output of completed scrambles.
//!
//! Each solution lands in one of twelve buckets: the number of visually
//! distinct face patterns it shows (1..6) crossed with whether any two
//! same-color stickers still touch diagonally across a face seam. A bucket
//! is one append-only text file of solutions, one per line, as the 54
//! comma-separated sticker origins.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::cube::{cube_connectedness, Connectedness, Cube, FACES};

/// Number of output buckets: six pattern counts, plain and perfect.
pub const BUCKETS: usize = 12;

/// Receives every solution the edge search completes.
pub trait SolutionSink {
    /// `cube` is the full 54-sticker assignment; `patterns` are its six
    /// face pattern ids.
    fn record(&mut self, cube: &Cube, patterns: &[u16; FACES]);
}

/// The file name of a bucket.
pub fn bucket_filename(unique_patterns: usize, perfect: bool) -> String {
    format!(
        "Solutions_{unique_patterns}_patterns{}.txt",
        if perfect { "_Perfect" } else { "" }
    )
}

/// Writes solutions to the twelve bucket files and keeps running counts.
pub struct SolutionFiles {
    directory: PathBuf,
    files: [Option<File>; BUCKETS],
    counts: [u64; BUCKETS],
    total: u64,
    rejected: u64,
}

impl SolutionFiles {
    /// Buckets will be created in `directory` on first use.
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            files: std::array::from_fn(|_| None),
            counts: [0; BUCKETS],
            total: 0,
            rejected: 0,
        }
    }

    /// Solutions written so far, per bucket. Buckets 0..6 count the plain
    /// solutions with 1..6 distinct patterns, buckets 6..12 the perfect
    /// ones.
    pub fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// Total solutions written so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Solutions rejected as logic errors.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    fn append(&mut self, bucket: usize, unique_patterns: usize, perfect: bool, cube: &Cube) -> io::Result<()> {
        if self.files[bucket].is_none() {
            let path = self.directory.join(bucket_filename(unique_patterns, perfect));
            self.files[bucket] = Some(OpenOptions::new().create(true).append(true).open(path)?);
        }
        let file = self.files[bucket].as_mut().unwrap();
        writeln!(file, "{}", format_solution_line(cube))
    }

    fn print_progress(&self) {
        let counts = self
            .counts
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        println!("solutions: {counts}");
    }
}

impl SolutionSink for SolutionFiles {
    fn record(&mut self, cube: &Cube, patterns: &[u16; FACES]) {
        let unique_patterns = count_unique_patterns(patterns);
        let connectedness = cube_connectedness(cube);

        if connectedness < Connectedness::AdjacentFacesTouching {
            // the search prunes these long before a full cube exists
            eprintln!("Same-color stickers touch on a face of a finished solution; this is a bug.");
            self.rejected += 1;
            return;
        }
        let perfect = connectedness == Connectedness::NothingTouching;

        let bucket = unique_patterns - 1 + if perfect { FACES } else { 0 };
        if let Err(error) = self.append(bucket, unique_patterns, perfect, cube) {
            eprintln!(
                "Unable to write to {}: {error}",
                bucket_filename(unique_patterns, perfect)
            );
            return;
        }

        self.counts[bucket] += 1;
        self.total += 1;
        if self.total % 100 == 0 || perfect {
            self.print_progress();
        }
    }
}

/// How many of the six face pattern ids are distinct.
fn count_unique_patterns(patterns: &[u16; FACES]) -> usize {
    let mut unique = 0;
    for (index, pattern) in patterns.iter().enumerate() {
        if !patterns[..index].contains(pattern) {
            unique += 1;
        }
    }
    unique
}

/// One output line: the 54 sticker origins, comma separated.
fn format_solution_line(cube: &Cube) -> String {
    let mut line = String::with_capacity(3 * cube.len());
    for (index, surface) in cube.iter().enumerate() {
        if index > 0 {
            line.push(',');
        }
        line.push_str(&surface.to_string());
    }
    line
}
