//! Cube layout and whole-cube color evaluation.
//!
//! The cube is represented as 54 sticker surfaces numbered in reading order
//! across six 3x3 faces: Back (0..8), Left (9..17), Up (18..26),
//! Right (27..35), Front (36..44), Down (45..53).
//!
//! ```text
//!      B B B
//!      B B B
//!      B B B
//! L L L  U U U  R R R
//! L L L  U U U  R R R
//! L L L  U U U  R R R
//!      F F F
//!      F F F
//!      F F F
//!      D D D
//!      D D D
//!      D D D
//! ```
//!
//! A surface holds the solved-state position of the sticker currently
//! occupying it, so its color is `value / 9`. The center of face `f` sits at
//! `9 * f + 4` and never moves. The same slot tables describe both positions
//! and pieces: the corner piece whose solved stickers are surfaces
//! {18, 11, 6} occupies the corner position with those same three slots.

/// Visible surfaces on the cube.
pub const SURFACES: usize = 54;

/// Faces on the cube.
pub const FACES: usize = 6;

/// Colors on the cube, one per face.
pub const COLORS: usize = 6;

/// Corner pieces, three stickers each.
pub const CORNERS: usize = 8;

/// Edge pieces, two stickers each.
pub const EDGES: usize = 12;

/// A cube as 54 sticker origins. Partial cubes leave unplaced surfaces at 0
/// so two disjoint partial assignments combine with bitwise OR.
pub type Cube = [u8; SURFACES];

/// The color of a sticker origin (or of a position's face).
#[inline(always)]
pub fn color_of(surface: u8) -> u8 {
    surface / 9
}

/// The three surfaces of each corner piece, in a cyclic order consistent
/// with orientation: twisting by +1 moves the sticker at slot k to slot k+1.
pub const CORNER_SLOTS: [[u8; 3]; CORNERS] = [
    [18, 11, 6],
    [20, 8, 27],
    [24, 36, 17],
    [26, 33, 38],
    [45, 15, 42],
    [47, 44, 35],
    [51, 0, 9],
    [53, 29, 2],
];

/// The two surfaces of each edge piece; flip 0 is the solved orientation.
pub const EDGE_SLOTS: [[u8; 2]; EDGES] = [
    [52, 1],
    [3, 10],
    [5, 28],
    [19, 7],
    [48, 12],
    [21, 14],
    [39, 16],
    [23, 30],
    [25, 37],
    [50, 32],
    [41, 34],
    [46, 43],
];

/// Corner-cell triples that must not share one color, grouped by the corner
/// placement depth that completes them. Each face has four corner cells and
/// therefore four such triples; a triple appears at the depth where its last
/// cell is filled, so the checks only ever read placed surfaces.
pub const CORNER_FACE_TRIPLES: [&[[u8; 3]]; CORNERS] = [
    &[],
    &[],
    &[[18, 20, 24]],
    &[[18, 20, 26], [18, 24, 26], [20, 24, 26]],
    &[[11, 15, 17], [36, 38, 42]],
    &[[27, 33, 35], [36, 38, 44], [36, 42, 44], [38, 42, 44]],
    &[
        [0, 6, 8],
        [45, 47, 51],
        [9, 11, 15],
        [9, 11, 17],
        [9, 15, 17],
    ],
    &[
        [0, 2, 6],
        [0, 2, 8],
        [2, 6, 8],
        [27, 29, 33],
        [27, 29, 35],
        [29, 33, 35],
        [45, 47, 53],
        [45, 51, 53],
        [47, 51, 53],
    ],
];

/// Same-face diagonal pairs between edge cells, grouped by the edge
/// placement depth that completes them. Four pairs per face.
pub const EDGE_DIAGONAL_CHECKS: [&[[u8; 2]]; EDGES] = [
    &[],
    &[[1, 3]],
    &[[1, 5]],
    &[[3, 7], [5, 7]],
    &[[10, 12], [48, 52]],
    &[[10, 14], [19, 21]],
    &[[12, 16], [14, 16]],
    &[[19, 23], [28, 30]],
    &[[21, 25], [23, 25], [37, 39]],
    &[[28, 32], [50, 52]],
    &[[30, 34], [32, 34], [37, 41]],
    &[[39, 43], [41, 43], [46, 48], [46, 50]],
];

/// Faces whose four edge cells are all filled once edge k is placed. Faces
/// complete in index order, so the edges' contribution to a face id can be
/// finalized at these depths.
pub const EDGE_COMPLETED_FACES: [&[usize]; EDGES] = [
    &[],
    &[],
    &[],
    &[0],
    &[],
    &[],
    &[1],
    &[],
    &[2],
    &[],
    &[3],
    &[4, 5],
];

/// Cell pairs within a 3x3 face that touch along a side.
pub const FACE_SIDE_PAIRS: [[u8; 2]; 12] = [
    [0, 1],
    [1, 2],
    [3, 4],
    [4, 5],
    [6, 7],
    [7, 8],
    [0, 3],
    [3, 6],
    [1, 4],
    [4, 7],
    [2, 5],
    [5, 8],
];

/// Cell pairs within a 3x3 face that touch at a diagonal.
pub const FACE_DIAGONAL_PAIRS: [[u8; 2]; 8] = [
    [0, 4],
    [2, 4],
    [6, 4],
    [8, 4],
    [1, 3],
    [3, 7],
    [7, 5],
    [5, 1],
];

/// Expands a face-local pair list to all six faces.
const fn expand_pairs<const N: usize, const M: usize>(base: [[u8; 2]; N]) -> [[u8; 2]; M] {
    let mut out = [[0u8; 2]; M];
    let mut face = 0;
    while face < FACES {
        let mut i = 0;
        while i < N {
            out[face * N + i] = [base[i][0] + 9 * face as u8, base[i][1] + 9 * face as u8];
            i += 1;
        }
        face += 1;
    }
    out
}

/// Surface pairs touching along a side on the same face.
pub const SAME_FACE_SIDES: [[u8; 2]; 72] = expand_pairs(FACE_SIDE_PAIRS);

/// Surface pairs touching at a diagonal on the same face.
pub const SAME_FACE_DIAGONALS: [[u8; 2]; 48] = expand_pairs(FACE_DIAGONAL_PAIRS);

/// Surface pairs touching at a diagonal across the seam between two faces.
pub const CROSS_FACE_DIAGONALS: [[u8; 2]; 48] = [
    [19, 6],
    [19, 8],
    [21, 11],
    [21, 17],
    [23, 27],
    [23, 33],
    [25, 36],
    [25, 38],
    [37, 24],
    [37, 26],
    [39, 17],
    [39, 15],
    [41, 33],
    [41, 35],
    [43, 45],
    [43, 47],
    [46, 42],
    [46, 44],
    [48, 15],
    [48, 9],
    [50, 35],
    [50, 29],
    [52, 0],
    [52, 2],
    [1, 51],
    [1, 53],
    [3, 9],
    [3, 11],
    [5, 29],
    [5, 27],
    [7, 18],
    [7, 20],
    [10, 0],
    [10, 6],
    [12, 51],
    [12, 45],
    [14, 18],
    [14, 24],
    [16, 42],
    [16, 36],
    [28, 8],
    [28, 2],
    [30, 20],
    [30, 26],
    [32, 53],
    [32, 47],
    [34, 38],
    [34, 44],
];

/// How closely two stickers of the same color approach each other, ordered
/// from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Connectedness {
    /// Two same-color stickers share a side on one face.
    SidesTouching,
    /// Two same-color stickers touch at a diagonal on one face.
    CornersTouching,
    /// Two same-color stickers touch at a diagonal across a face seam.
    AdjacentFacesTouching,
    /// No same-color stickers touch at all.
    NothingTouching,
}

/// Classifies a complete cube by its worst same-color adjacency.
pub fn cube_connectedness(cube: &Cube) -> Connectedness {
    let mut colors = [0u8; SURFACES];
    for (color, &surface) in colors.iter_mut().zip(cube.iter()) {
        *color = color_of(surface);
    }

    for &[a, b] in &SAME_FACE_SIDES {
        if colors[a as usize] == colors[b as usize] {
            return Connectedness::SidesTouching;
        }
    }

    for &[a, b] in &SAME_FACE_DIAGONALS {
        if colors[a as usize] == colors[b as usize] {
            return Connectedness::CornersTouching;
        }
    }

    for &[a, b] in &CROSS_FACE_DIAGONALS {
        if colors[a as usize] == colors[b as usize] {
            return Connectedness::AdjacentFacesTouching;
        }
    }

    Connectedness::NothingTouching
}

/// A cube with only the six fixed centers filled in.
pub fn centers_only() -> Cube {
    let mut cube = [0u8; SURFACES];
    for face in 0..FACES {
        cube[face * 9 + 4] = (face * 9 + 4) as u8;
    }
    cube
}

/// The solved cube: every sticker at its origin.
pub fn solved() -> Cube {
    std::array::from_fn(|surface| surface as u8)
}

/// The corners' contribution to a face id: the colors of cells 0, 2, 4, 6, 8
/// of the face (center included) at their base-6 digit positions.
pub fn corner_face_id(cube: &Cube, face: usize) -> u32 {
    let base = face * 9;
    let color = |cell: usize| (cube[base + cell] / 9) as u32;
    (((color(0) * 36 + color(2)) * 36 + color(4)) * 36 + color(6)) * 36 + color(8)
}

/// The edges' contribution to a face id: the colors of cells 1, 3, 5, 7 of
/// the face at their base-6 digit positions. Disjoint from the corner
/// contribution, so the two sum to the full face id.
pub fn edge_face_id(cube: &Cube, face: usize) -> u32 {
    let base = face * 9;
    let color = |cell: usize| (cube[base + cell] / 9) as u32;
    (((color(1) * 36 + color(3)) * 36 + color(5)) * 36 + color(7)) * 6
}

/// The full face id of a completely filled face.
pub fn face_id(cube: &Cube, face: usize) -> u32 {
    let base = face * 9;
    (0..9).fold(0u32, |id, cell| id * 6 + (cube[base + cell] / 9) as u32)
}

/// Formats a cube as a color-digit net for display and debugging.
///
/// The Back face sits above the Left/Up/Right band, with Front and Down
/// below, matching the surface numbering.
pub fn format_cube(cube: &Cube) -> String {
    let mut output = String::new();
    let digit = |face: usize, row: usize, col: usize| {
        char::from(b'0' + color_of(cube[face * 9 + row * 3 + col]))
    };
    let single = |output: &mut String, face: usize| {
        for row in 0..3 {
            output.push_str("     ");
            for col in 0..3 {
                output.push(digit(face, row, col));
            }
            output.push('\n');
        }
    };

    single(&mut output, 0);
    for row in 0..3 {
        for (index, face) in [1usize, 2, 3].into_iter().enumerate() {
            if index > 0 {
                output.push_str("  ");
            }
            for col in 0..3 {
                output.push(digit(face, row, col));
            }
        }
        output.push('\n');
    }
    single(&mut output, 4);
    single(&mut output, 5);

    output
}
