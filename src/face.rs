//! The face pattern table.
//!
//! A face coloring is keyed by its face id: the nine cell colors read as a
//! base-6 number, giving 6^9 = 10,077,696 possible arrangements. The table
//! maps every face id to a small pattern id shared by all arrangements
//! reachable from each other through the face's eight dihedral symmetries
//! and any relabeling of the six colors. Ids 0..16 are the perfect
//! patterns: all six colors present, none more than twice, and no two
//! same-color cells touching on a side or a diagonal.

use indicatif::{ProgressBar, ProgressStyle};

use crate::cube::{Connectedness, FACE_DIAGONAL_PAIRS, FACE_SIDE_PAIRS, COLORS};

/// Every possible arrangement of six colors on nine cells.
pub const FACE_ARRANGEMENTS: usize = 10_077_696;

/// Pattern ids below this value are perfect.
pub const PERFECT_PATTERNS: u16 = 16;

/// Sentinel for table entries not yet assigned during construction.
const UNSET: u16 = 32767;

/// The eight symmetries of a 3x3 face: cell i of the transformed face takes
/// the color of cell SYMMETRIES[s][i] of the original.
const SYMMETRIES: [[usize; 9]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8], // original face
    [2, 5, 8, 1, 4, 7, 0, 3, 6], // rotated 90 degrees counter-clockwise
    [8, 7, 6, 5, 4, 3, 2, 1, 0], // rotated 180 degrees
    [6, 3, 0, 7, 4, 1, 8, 5, 2], // rotated 90 degrees clockwise
    [2, 1, 0, 5, 4, 3, 8, 7, 6], // flipped
    [8, 5, 2, 7, 4, 1, 6, 3, 0], // flipped, rotated 90 degrees clockwise
    [6, 7, 8, 3, 4, 5, 0, 1, 2], // flipped, rotated 180 degrees
    [0, 3, 6, 1, 4, 7, 2, 5, 8], // flipped, rotated 90 degrees counter-clockwise
];

/// Decodes a face id into its nine cell colors, cell 0 first.
pub fn decode_face(mut face_id: usize) -> [u8; 9] {
    let mut cells = [0u8; 9];
    for cell in &mut cells {
        *cell = (face_id % COLORS) as u8;
        face_id /= COLORS;
    }
    cells
}

/// Counts the distinct colors on a face and the highest count of any one
/// color.
pub fn face_color_counts(cells: &[u8; 9]) -> (u8, u8) {
    let mut counts = [0u8; COLORS];
    let mut distinct = 0;
    let mut max_instances = 0;
    for &cell in cells {
        let count = &mut counts[cell as usize];
        if *count == 0 {
            distinct += 1;
        }
        *count += 1;
        max_instances = max_instances.max(*count);
    }
    (distinct, max_instances)
}

/// Classifies a single face by its worst same-color adjacency. Only the
/// first three `Connectedness` levels apply to a lone face.
pub fn face_connectedness(cells: &[u8; 9]) -> Connectedness {
    for &[a, b] in &FACE_SIDE_PAIRS {
        if cells[a as usize] == cells[b as usize] {
            return Connectedness::SidesTouching;
        }
    }
    for &[a, b] in &FACE_DIAGONAL_PAIRS {
        if cells[a as usize] == cells[b as usize] {
            return Connectedness::CornersTouching;
        }
    }
    Connectedness::NothingTouching
}

/// Whether a pattern id marks a perfect face pattern.
#[inline(always)]
pub fn is_perfect(pattern: u16) -> bool {
    pattern < PERFECT_PATTERNS
}

/// Calls `apply` with every permutation of the six colors.
fn for_each_relabeling(relabel: &mut [u8; COLORS], position: usize, apply: &mut impl FnMut(&[u8; COLORS])) {
    if position == COLORS - 1 {
        apply(relabel);
        return;
    }
    for choice in position..COLORS {
        relabel.swap(position, choice);
        for_each_relabeling(relabel, position + 1, apply);
        relabel.swap(position, choice);
    }
}

/// The pattern id for every possible face arrangement.
pub struct FaceTable {
    ids: Vec<u16>,
}

impl FaceTable {
    /// Builds the table from scratch.
    ///
    /// Scans face ids in ascending order; the first id of each orbit under
    /// (dihedral symmetry x color relabeling) gets the next fresh pattern
    /// id (perfect ids count up from 0, regular ids from 16), and the
    /// whole orbit is stamped with it before the scan moves on. The scan
    /// order makes the table deterministic regardless of how the orbit
    /// itself is walked.
    pub fn build() -> Self {
        let mut ids = vec![UNSET; FACE_ARRANGEMENTS];
        let mut next_perfect = 0u16;
        let mut next_regular = PERFECT_PATTERNS;

        let progress = ProgressBar::new(FACE_ARRANGEMENTS as u64);
        progress.set_style(
            ProgressStyle::with_template("{elapsed_precise} {wide_bar} {pos} / {len} face ids")
                .unwrap(),
        );

        for face_id in 0..FACE_ARRANGEMENTS {
            if face_id & 0xFFFF == 0 {
                progress.set_position(face_id as u64);
            }
            if ids[face_id] != UNSET {
                continue;
            }

            let cells = decode_face(face_id);
            let (distinct, max_instances) = face_color_counts(&cells);
            let connectedness = face_connectedness(&cells);

            let pattern = if distinct as usize == COLORS
                && max_instances == 2
                && connectedness == Connectedness::NothingTouching
            {
                let pattern = next_perfect;
                next_perfect += 1;
                pattern
            } else {
                let pattern = next_regular;
                next_regular += 1;
                pattern
            };

            for symmetry in &SYMMETRIES {
                let moved: [u8; 9] = std::array::from_fn(|cell| cells[symmetry[cell]]);
                let mut relabel: [u8; COLORS] = std::array::from_fn(|color| color as u8);
                for_each_relabeling(&mut relabel, 0, &mut |relabel| {
                    let mut transformed = 0usize;
                    for cell in (0..9).rev() {
                        transformed = transformed * COLORS + relabel[moved[cell] as usize] as usize;
                    }
                    if ids[transformed] == UNSET {
                        ids[transformed] = pattern;
                    }
                });
            }
        }
        progress.finish_and_clear();

        assert_eq!(
            next_perfect, PERFECT_PATTERNS,
            "expected exactly 16 perfect face patterns"
        );
        assert!(
            ids.iter().all(|&id| id != UNSET),
            "every face arrangement belongs to an orbit"
        );

        Self { ids }
    }

    /// Wraps a previously built id vector (from the cache or a test).
    pub(crate) fn from_ids(ids: Vec<u16>) -> Self {
        assert_eq!(ids.len(), FACE_ARRANGEMENTS);
        Self { ids }
    }

    /// The pattern id of a face arrangement.
    #[inline(always)]
    pub fn pattern_id(&self, face_id: usize) -> u16 {
        self.ids[face_id]
    }

    /// The raw id vector, for the cache writer.
    pub(crate) fn ids(&self) -> &[u16] {
        &self.ids
    }
}
