//! File caching of the face table and corner arrangements.
//!
//! Both caches are raw little-endian blobs with no header; their sizes are
//! fixed by the constants they were built from, and a file of any other
//! size is treated as a miss.
//!
//! `FaceTable.dat`: 10,077,696 u16 pattern ids (20,155,392 bytes).
//!
//! `Corners.dat`: the even-parity arrangements followed by the odd-parity
//! ones, 102 bytes per entry:
//! - 54 bytes: sticker origins (edge surfaces zero)
//! - 6 x u32: per-face corner contributions
//! - 6 x i32: next-distinct indexes (-1 as the end sentinel)

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::corners::{CornerArrangement, CornerArrangements, EVEN_ARRANGEMENTS, ODD_ARRANGEMENTS};
use crate::cube::{Cube, FACES, SURFACES};
use crate::face::{FaceTable, FACE_ARRANGEMENTS};

/// Cache file for the face pattern table.
pub const FACE_TABLE_FILE: &str = "FaceTable.dat";

/// Cache file for the corner arrangements.
pub const CORNERS_FILE: &str = "Corners.dat";

/// Bytes per serialized corner arrangement.
const ENTRY_BYTES: usize = SURFACES + FACES * 4 + FACES * 4;

/// Loads the face table, or `None` when the cache is missing or malformed.
pub fn load_face_table(path: &Path) -> Option<FaceTable> {
    let bytes = fs::read(path).ok()?;
    if bytes.len() != FACE_ARRANGEMENTS * 2 {
        return None;
    }
    let ids = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Some(FaceTable::from_ids(ids))
}

/// Writes the face table cache.
pub fn save_face_table(table: &FaceTable, path: &Path) -> std::io::Result<()> {
    let mut bytes = Vec::with_capacity(FACE_ARRANGEMENTS * 2);
    for &id in table.ids() {
        bytes.extend_from_slice(&id.to_le_bytes());
    }
    fs::write(path, bytes)
}

/// Loads the corner arrangements, or `None` when the cache is missing or
/// malformed.
pub fn load_corner_arrangements(path: &Path) -> Option<CornerArrangements> {
    let bytes = fs::read(path).ok()?;
    if bytes.len() != ENTRY_BYTES * (EVEN_ARRANGEMENTS + ODD_ARRANGEMENTS) {
        return None;
    }
    let (even_bytes, odd_bytes) = bytes.split_at(ENTRY_BYTES * EVEN_ARRANGEMENTS);
    Some(CornerArrangements {
        even: decode_arrangements(even_bytes),
        odd: decode_arrangements(odd_bytes),
    })
}

/// Writes the corner arrangement cache.
pub fn save_corner_arrangements(
    arrangements: &CornerArrangements,
    path: &Path,
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in arrangements.even.iter().chain(arrangements.odd.iter()) {
        writer.write_all(&encode_entry(entry))?;
    }
    writer.flush()
}

fn encode_entry(entry: &CornerArrangement) -> [u8; ENTRY_BYTES] {
    let mut bytes = [0u8; ENTRY_BYTES];
    bytes[..SURFACES].copy_from_slice(&entry.stickers);
    let mut offset = SURFACES;
    for &face_id in &entry.face_ids {
        bytes[offset..offset + 4].copy_from_slice(&face_id.to_le_bytes());
        offset += 4;
    }
    for &next in &entry.next_distinct {
        bytes[offset..offset + 4].copy_from_slice(&next.to_le_bytes());
        offset += 4;
    }
    bytes
}

fn decode_entry(bytes: &[u8]) -> CornerArrangement {
    let mut stickers: Cube = [0; SURFACES];
    stickers.copy_from_slice(&bytes[..SURFACES]);
    let mut offset = SURFACES;
    let word = |offset: &mut usize| {
        let value: [u8; 4] = bytes[*offset..*offset + 4].try_into().unwrap();
        *offset += 4;
        value
    };
    let face_ids = std::array::from_fn(|_| u32::from_le_bytes(word(&mut offset)));
    let next_distinct = std::array::from_fn(|_| i32::from_le_bytes(word(&mut offset)));
    CornerArrangement {
        stickers,
        face_ids,
        next_distinct,
    }
}

fn decode_arrangements(bytes: &[u8]) -> Vec<CornerArrangement> {
    bytes.chunks_exact(ENTRY_BYTES).map(decode_entry).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cube::solved;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scrambler-{name}-{}", std::process::id()))
    }

    fn sample_entry(seed: u32) -> CornerArrangement {
        CornerArrangement {
            stickers: solved(),
            face_ids: std::array::from_fn(|face| seed + face as u32),
            next_distinct: [3, 1, 4, 1, 5, -1],
        }
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = sample_entry(42);
        assert_eq!(decode_entry(&encode_entry(&entry)), entry);
    }

    #[test]
    fn test_arrangement_bytes_roundtrip() {
        let entries = vec![sample_entry(0), sample_entry(100), sample_entry(200)];
        let bytes: Vec<u8> = entries.iter().flat_map(|e| encode_entry(e)).collect();
        assert_eq!(bytes.len(), 3 * ENTRY_BYTES);
        assert_eq!(decode_arrangements(&bytes), entries);
    }

    #[test]
    fn test_face_table_roundtrip() {
        let ids: Vec<u16> = (0..FACE_ARRANGEMENTS).map(|i| (i % 2000) as u16).collect();
        let table = FaceTable::from_ids(ids);
        let path = temp_path("face-table");

        save_face_table(&table, &path).unwrap();
        let reloaded = load_face_table(&path).expect("cache should load");
        assert_eq!(reloaded.ids(), table.ids());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_cache_is_a_miss() {
        assert!(load_face_table(Path::new("no-such-file.dat")).is_none());
        assert!(load_corner_arrangements(Path::new("no-such-file.dat")).is_none());
    }

    #[test]
    fn test_truncated_cache_is_a_miss() {
        let path = temp_path("truncated");
        fs::write(&path, [0u8; 1000]).unwrap();
        assert!(load_face_table(&path).is_none());
        assert!(load_corner_arrangements(&path).is_none());
        fs::remove_file(&path).unwrap();
    }
}
