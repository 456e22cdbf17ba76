//! Depth-first placement of the twelve edge pieces.
//!
//! Edges are placed one position at a time, each as a piece choice (tracked
//! through a swap permutation, which carries the permutation parity) and a
//! flip bit. The last position is a pure leaf: its piece is whatever
//! remains and its flip is forced by the flip parity, so every completed
//! placement satisfies the cube's flip law. The matching corner
//! arrangements must have the same permutation sign, which selects the
//! even or odd corner array at the leaf.
//!
//! Pruning happens at three levels: an edge sticker may not match its
//! face's center color, the same-face diagonal pairs completed by the new
//! edge may not repeat a color, and whenever a face's four edge cells are
//! complete, both corner-array cursors are advanced past every
//! arrangement that cannot combine with the edges placed so far into
//! perfect face patterns. A branch dies when both cursors run out.

use crate::corners::{advance, CornerArrangements};
use crate::cube::{
    centers_only, color_of, edge_face_id, Cube, EDGES, EDGE_COMPLETED_FACES,
    EDGE_DIAGONAL_CHECKS, EDGE_SLOTS, FACES,
};
use crate::face::FaceTable;
use crate::solutions::SolutionSink;

/// Counters for completed edge placements, split by permutation parity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeTotals {
    pub all: u64,
    pub even: u64,
    pub odd: u64,
}

/// The edge placement search. Borrows the read-only tables; owns the
/// per-search working state.
pub struct EdgeSearch<'a> {
    table: &'a FaceTable,
    corners: &'a CornerArrangements,
    cube: Cube,
    pieces: [u8; EDGES],
    face_ids: [u32; FACES],
    totals: EdgeTotals,
}

impl<'a> EdgeSearch<'a> {
    pub fn new(table: &'a FaceTable, corners: &'a CornerArrangements) -> Self {
        Self {
            table,
            corners,
            cube: centers_only(),
            pieces: std::array::from_fn(|piece| piece as u8),
            face_ids: [0; FACES],
            totals: EdgeTotals::default(),
        }
    }

    /// Runs the full search, handing every solution to `sink`.
    pub fn run(&mut self, sink: &mut impl SolutionSink) {
        self.place_edge(0, 0, 0, 0, 0, sink);
    }

    /// How many complete edge placements survived the pruning.
    pub fn totals(&self) -> EdgeTotals {
        self.totals
    }

    fn place_edge(
        &mut self,
        depth: usize,
        swap_parity: u8,
        flip_parity: u8,
        even_index: i32,
        odd_index: i32,
        sink: &mut impl SolutionSink,
    ) {
        if depth == EDGES - 1 {
            let index = if swap_parity == 0 { even_index } else { odd_index };
            self.place_last_edge(swap_parity, flip_parity, index, sink);
            return;
        }

        for position in depth..EDGES {
            if position != depth {
                self.pieces.swap(depth, position);
            }
            let swap_parity = swap_parity ^ (position != depth) as u8;

            for flip in 0..2u8 {
                write_edge(&mut self.cube, depth, self.pieces[depth], flip);
                if !edge_fits(&self.cube, depth) {
                    continue;
                }

                let completed = EDGE_COMPLETED_FACES[depth];
                if completed.is_empty() {
                    self.place_edge(
                        depth + 1,
                        swap_parity,
                        flip_parity ^ flip,
                        even_index,
                        odd_index,
                        sink,
                    );
                    continue;
                }

                // a face just finished: fix its edge contribution and skip
                // both corner arrays past everything that can no longer
                // produce perfect patterns on the finished prefix
                for &face in completed {
                    self.face_ids[face] = edge_face_id(&self.cube, face);
                }
                let face_count = completed[completed.len() - 1] + 1;
                let even_index =
                    advance(&self.corners.even, even_index, &self.face_ids, face_count, self.table);
                let odd_index =
                    advance(&self.corners.odd, odd_index, &self.face_ids, face_count, self.table);
                if even_index != -1 || odd_index != -1 {
                    self.place_edge(
                        depth + 1,
                        swap_parity,
                        flip_parity ^ flip,
                        even_index,
                        odd_index,
                        sink,
                    );
                }
            }

            if position != depth {
                self.pieces.swap(depth, position);
            }
        }
    }

    fn place_last_edge(
        &mut self,
        swap_parity: u8,
        flip_parity: u8,
        index: i32,
        sink: &mut impl SolutionSink,
    ) {
        let depth = EDGES - 1;
        // the remaining piece is forced, and the flip must even out the sum
        write_edge(&mut self.cube, depth, self.pieces[depth], flip_parity);
        if !edge_fits(&self.cube, depth) {
            return;
        }
        for &face in EDGE_COMPLETED_FACES[depth] {
            self.face_ids[face] = edge_face_id(&self.cube, face);
        }

        self.totals.all += 1;
        if swap_parity == 0 {
            self.totals.even += 1;
        } else {
            self.totals.odd += 1;
        }

        let arrangements = if swap_parity == 0 {
            &self.corners.even
        } else {
            &self.corners.odd
        };
        let mut index = advance(arrangements, index, &self.face_ids, FACES, self.table);
        while index != -1 {
            let entry = &arrangements[index as usize];
            let mut patterns = [0u16; FACES];
            for face in 0..FACES {
                patterns[face] =
                    self.table.pattern_id((self.face_ids[face] + entry.face_ids[face]) as usize);
            }

            let mut solution = self.cube;
            for (slot, &sticker) in solution.iter_mut().zip(entry.stickers.iter()) {
                *slot |= sticker;
            }
            sink.record(&solution, &patterns);

            index = advance(arrangements, index + 1, &self.face_ids, FACES, self.table);
        }
    }
}

/// Writes edge piece `piece` into edge position `position` with the given
/// flip.
fn write_edge(cube: &mut Cube, position: usize, piece: u8, flip: u8) {
    let slots = EDGE_SLOTS[position];
    let stickers = EDGE_SLOTS[piece as usize];
    cube[slots[0] as usize] = stickers[flip as usize];
    cube[slots[1] as usize] = stickers[(flip ^ 1) as usize];
}

/// Checks the edge just placed at `position`: neither sticker may match the
/// center color of its face, and no completed same-face diagonal pair may
/// repeat a color.
fn edge_fits(cube: &Cube, position: usize) -> bool {
    let slots = EDGE_SLOTS[position];
    if slots
        .iter()
        .any(|&slot| color_of(cube[slot as usize]) == color_of(slot))
    {
        return false;
    }
    EDGE_DIAGONAL_CHECKS[position]
        .iter()
        .all(|&[a, b]| color_of(cube[a as usize]) != color_of(cube[b as usize]))
}
