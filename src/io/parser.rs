//! Game identifier parsing
//!
//! A puzzle is a compact identifier such as `4x4:9554b554b5543554`:
//! the dimensions, an optional trailing `w` marking a wrapping board,
//! and one hex digit per tile giving the connector mask of the seed in
//! row-major order. Connector bits are east 1, north 2, west 4, south 8.

use crate::io::configuration::MAX_BOARD_DIMENSION;
use crate::io::error::{Result, SolverError};
use crate::puzzle::board::Board;
use crate::puzzle::tile::Tile;

/// A game identifier broken into its parts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameId {
    width: usize,
    height: usize,
    wrapping: bool,
    masks: Vec<u8>,
}

impl GameId {
    /// Parse the `WxH[w]:hexdigits` grammar
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedGameId` for anything outside the grammar,
    /// `BoardTooLarge` past the dimension cap, and `TileCountMismatch`
    /// when the digit count disagrees with the declared size.
    pub fn parse(id: &str) -> Result<Self> {
        let (size, digits) = id.split_once(':').ok_or_else(|| unrecognized(id))?;
        let (size, wrapping) = size
            .strip_suffix('w')
            .map_or((size, false), |stripped| (stripped, true));
        let (width, height) = size.split_once('x').ok_or_else(|| unrecognized(id))?;
        let width: usize = width.parse().map_err(|_| unrecognized(id))?;
        let height: usize = height.parse().map_err(|_| unrecognized(id))?;

        if width == 0 || height == 0 {
            return Err(unrecognized(id));
        }
        if width > MAX_BOARD_DIMENSION || height > MAX_BOARD_DIMENSION {
            return Err(SolverError::BoardTooLarge { width, height });
        }

        let mut masks = Vec::with_capacity(digits.len());
        for ch in digits.chars() {
            let value = ch.to_digit(16).ok_or_else(|| unrecognized(id))?;
            masks.push(value as u8);
        }
        if masks.len() != width * height {
            return Err(SolverError::TileCountMismatch {
                expected: width * height,
                found: masks.len(),
            });
        }

        Ok(Self {
            width,
            height,
            wrapping,
            masks,
        })
    }

    /// Declared number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Declared number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the identifier declares a wrapping board
    pub const fn wrapping(&self) -> bool {
        self.wrapping
    }

    /// Build the board to solve, with every tile reduced to its archetype
    ///
    /// Each seed digit contributes the full rotation set of its tile
    /// shape; the digit's particular rotation is deliberately forgotten.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeedTile` for a digit with no connectors or with
    /// all four, neither of which is a rotatable pipe tile.
    pub fn board(&self) -> Result<Board> {
        let tiles = self.tiles(Tile::like)?;
        Board::new(self.width, self.height, self.wrapping, tiles)
    }

    /// Build a board showing the seed exactly as given, for previews
    ///
    /// # Errors
    ///
    /// Rejects the same digits as [`GameId::board`].
    pub fn seed_preview(&self) -> Result<Board> {
        let tiles = self.tiles(|mask| Tile::like(mask).map(|_| Tile::exact(mask)))?;
        Board::new(self.width, self.height, self.wrapping, tiles)
    }

    fn tiles(&self, make: impl Fn(u8) -> Option<Tile>) -> Result<Vec<Tile>> {
        self.masks
            .iter()
            .enumerate()
            .map(|(index, &mask)| {
                make(mask).ok_or(SolverError::InvalidSeedTile {
                    index,
                    value: u32::from(mask),
                })
            })
            .collect()
    }
}

fn unrecognized(id: &str) -> SolverError {
    SolverError::UnrecognizedGameId { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::GameId;
    use crate::io::error::SolverError;

    #[test]
    fn test_parses_dimensions_and_digits() -> crate::Result<()> {
        let game = GameId::parse("4x4:9554b554b5543554")?;
        assert_eq!((game.width(), game.height()), (4, 4));
        assert!(!game.wrapping());
        Ok(())
    }

    #[test]
    fn test_trailing_w_declares_wrapping() -> crate::Result<()> {
        let game = GameId::parse("2x2w:9c36")?;
        assert!(game.wrapping());
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        for id in ["", "banana", "4x4", ":9554", "4:9554", "0x3:111", "ax2:11", "2x2:95zz"] {
            assert!(
                matches!(GameId::parse(id), Err(SolverError::UnrecognizedGameId { .. })),
                "'{id}' should be unrecognized"
            );
        }
    }

    #[test]
    fn test_rejects_wrong_digit_count() {
        assert!(matches!(
            GameId::parse("2x2:123"),
            Err(SolverError::TileCountMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_rejects_oversized_boards() {
        assert!(matches!(
            GameId::parse("20000x2:11"),
            Err(SolverError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_board_forgets_seed_rotations() -> crate::Result<()> {
        let game = GameId::parse("2x1:95")?;
        let board = game.board()?;
        // A bend digit contributes all four bend rotations, a line both
        assert_eq!(board.tile(0, 0).map(|t| t.candidate_count()), Some(4));
        assert_eq!(board.tile(1, 0).map(|t| t.candidate_count()), Some(2));
        Ok(())
    }

    #[test]
    fn test_seed_preview_keeps_rotations() -> crate::Result<()> {
        let game = GameId::parse("2x1:95")?;
        let preview = game.seed_preview()?;
        assert!(preview.solved());
        assert_eq!(preview.tile(0, 0).and_then(|t| t.solved_mask()), Some(0x9));
        Ok(())
    }

    #[test]
    fn test_rejects_unrotatable_digits() {
        for (id, bad_index) in [("2x1:05", 0), ("2x1:5f", 1)] {
            let game = match GameId::parse(id) {
                Ok(game) => game,
                Err(_) => unreachable!("grammar is valid"),
            };
            assert!(
                matches!(
                    game.board(),
                    Err(SolverError::InvalidSeedTile { index, .. }) if index == bad_index
                ),
                "'{id}' digit {bad_index} should be rejected"
            );
        }
    }
}
