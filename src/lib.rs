//! Perfectly Scrambled Cube Searcher Library
//!
//! Provides the core search functionality for enumerating perfectly
//! scrambled colorings of a 3x3x3 Rubik's cube: physically reachable
//! states where every face shows all six colors and no two same-colored
//! stickers touch on a side or a diagonal of any face.

pub mod corners;
pub mod cube;
pub mod edges;
pub mod face;
pub mod persistence;
pub mod solutions;
