//! The rectangular tile grid and its adjacency rules
//!
//! Adjacency is fully computable from coordinates and the wrapping flag,
//! so the board is a flat row-major array rather than a linked structure.
//! Snapshots for speculative search are plain deep copies of that array.

use crate::io::error::{Result, SolverError};
use crate::puzzle::direction::Direction;
use crate::puzzle::tile::Tile;
use ndarray::Array2;

/// A `width x height` grid of tiles, optionally toroidal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: Array2<Tile>,
    wrapping: bool,
}

impl Board {
    /// Build a board from tiles listed in row-major order
    ///
    /// Each tile is stamped with its grid position so that errors raised
    /// deep inside narrowing operations can name the offending cell.
    ///
    /// # Errors
    ///
    /// Returns `TileCountMismatch` if the tile list does not contain
    /// exactly `width * height` entries.
    pub fn new(width: usize, height: usize, wrapping: bool, tiles: Vec<Tile>) -> Result<Self> {
        let found = tiles.len();
        let tiles = Array2::from_shape_vec((height, width), tiles).map_err(|_| {
            SolverError::TileCountMismatch {
                expected: width * height,
                found,
            }
        })?;

        let mut board = Self { tiles, wrapping };
        for ((y, x), tile) in board.tiles.indexed_iter_mut() {
            tile.set_position(x, y);
        }
        Ok(board)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Whether opposite edges are identified (toroidal adjacency)
    pub const fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// Total number of tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// The tile at a position, if in bounds
    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get((y, x))
    }

    /// Mutable access to the tile at a position, if in bounds
    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.tiles.get_mut((y, x))
    }

    /// Row-major flat index of a position
    pub fn flat_index(&self, x: usize, y: usize) -> usize {
        y * self.width() + x
    }

    /// Position of a row-major flat index
    pub fn coords_of(&self, index: usize) -> (usize, usize) {
        let width = self.width().max(1);
        (index % width, index / width)
    }

    /// The position adjacent to `(x, y)` in the given direction
    ///
    /// At a hard edge this is `None`; on a wrapping board the lookup
    /// continues on the opposite edge. On a degenerate wrapping board a
    /// neighbor may resolve to the queried position itself.
    pub fn neighbor_of(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let width = self.width();
        let height = self.height();
        if x >= width || y >= height {
            return None;
        }

        match dir {
            Direction::North => {
                if y == 0 {
                    self.wrapping.then_some((x, height - 1))
                } else {
                    Some((x, y - 1))
                }
            }
            Direction::South => {
                if y == height - 1 {
                    self.wrapping.then_some((x, 0))
                } else {
                    Some((x, y + 1))
                }
            }
            Direction::West => {
                if x == 0 {
                    self.wrapping.then_some((width - 1, y))
                } else {
                    Some((x - 1, y))
                }
            }
            Direction::East => {
                if x == width - 1 {
                    self.wrapping.then_some((0, y))
                } else {
                    Some((x + 1, y))
                }
            }
        }
    }

    /// Whether every tile has exactly one orientation left
    pub fn solved(&self) -> bool {
        self.tiles.iter().all(Tile::solved)
    }

    /// Iterate tiles in row-major order
    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Deep copy of the full tile array, for speculative snapshots
    pub fn snapshot(&self) -> Array2<Tile> {
        self.tiles.clone()
    }

    /// Replace the full tile array from a snapshot
    pub fn restore(&mut self, snapshot: Array2<Tile>) {
        self.tiles = snapshot;
    }
}
