//! Board, tile, and direction domain model
//!
//! This module contains the puzzle state representation:
//! - Compass directions and the connector bitmask algebra
//! - Tile possibility sets with tri-state connector queries
//! - The board grid with optional toroidal adjacency

/// The rectangular grid of tiles and its adjacency rules
pub mod board;
/// Compass directions and connector bit flags
pub mod direction;
/// Per-cell orientation possibility sets
pub mod tile;

pub use board::Board;
pub use direction::Direction;
pub use tile::{Connectivity, Tile};
