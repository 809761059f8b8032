//! Tile possibility sets and tri-state connector queries
//!
//! An orientation is a 4-bit connector mask; the tile stores the set of
//! orientations it could still be as a 16-bit field indexed by mask value.
//! Narrowing operations keep the single hard invariant of the model: the
//! set never becomes empty, and an operation that would empty it fails
//! with an illegal-board-state error instead.

use crate::io::error::{Contradiction, Result, illegal_state};
use crate::puzzle::direction::Direction;

/// Orientations of a tile with exactly one connector
const NODE_SET: u16 = 1 << 0x1 | 1 << 0x2 | 1 << 0x4 | 1 << 0x8;
/// Orientations of a straight tile (two opposite connectors)
const LINE_SET: u16 = 1 << 0x5 | 1 << 0xA;
/// Orientations of a corner tile (two adjacent connectors)
const BEND_SET: u16 = 1 << 0x3 | 1 << 0x6 | 1 << 0x9 | 1 << 0xC;
/// Orientations of a junction tile (three connectors)
const TEE_SET: u16 = 1 << 0x7 | 1 << 0xB | 1 << 0xD | 1 << 0xE;

/// The set of orientation masks carrying a connector on the given side
const fn pointing_set(dir: Direction) -> u16 {
    let flag = dir.flag();
    let mut set = 0u16;
    let mut mask = 1u8;
    while mask <= 0xF {
        if mask & flag != 0 {
            set |= 1 << mask;
        }
        mask += 1;
    }
    set
}

/// Tri-state answer to "does this tile connect on a given side?"
///
/// Explicit three-valued state rather than a nullable boolean, so that
/// propagation logic can match exhaustively and treat "no information
/// yet" as first class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// Every remaining orientation carries this connector
    Connected,
    /// Some remaining orientations carry it, some do not
    Unknown,
    /// No remaining orientation carries this connector
    Disconnected,
}

/// A cell's identity and remaining orientation possibilities
///
/// The possibility set only ever shrinks during propagation and search;
/// it grows back solely through snapshot restoration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    x: usize,
    y: usize,
    possible: u16,
}

impl Tile {
    /// A tile with a single connector, in any of its four rotations
    pub const fn node() -> Self {
        Self::with_set(NODE_SET)
    }

    /// A straight tile, in either of its two rotations
    pub const fn line() -> Self {
        Self::with_set(LINE_SET)
    }

    /// A corner tile, in any of its four rotations
    pub const fn bend() -> Self {
        Self::with_set(BEND_SET)
    }

    /// A three-way junction tile, in any of its four rotations
    pub const fn tee() -> Self {
        Self::with_set(TEE_SET)
    }

    /// A tile fixed to exactly the given connector mask
    ///
    /// Used to render the raw, unrotated seed; the solving engine only
    /// sees archetype tiles built through [`Tile::like`].
    pub const fn exact(mask: u8) -> Self {
        Self::with_set(1 << (mask & 0xF))
    }

    /// The archetype tile matching a seed connector mask, if any
    pub const fn like(mask: u8) -> Option<Self> {
        let bit = 1u16 << (mask & 0xF);
        if NODE_SET & bit != 0 {
            Some(Self::node())
        } else if LINE_SET & bit != 0 {
            Some(Self::line())
        } else if BEND_SET & bit != 0 {
            Some(Self::bend())
        } else if TEE_SET & bit != 0 {
            Some(Self::tee())
        } else {
            None
        }
    }

    /// A tile restricted to an explicit list of orientation masks
    ///
    /// Masks outside `1..=15` are ignored. Intended for tests and for
    /// callers that pre-reduce a seed beyond its archetype.
    pub fn from_masks(masks: &[u8]) -> Self {
        let mut set = 0u16;
        for &mask in masks {
            if (1..=0xF).contains(&mask) {
                set |= 1 << mask;
            }
        }
        Self::with_set(set)
    }

    const fn with_set(possible: u16) -> Self {
        Self { x: 0, y: 0, possible }
    }

    /// Column of this tile on the board
    pub const fn x(&self) -> usize {
        self.x
    }

    /// Row of this tile on the board
    pub const fn y(&self) -> usize {
        self.y
    }

    pub(crate) const fn set_position(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }

    /// Whether exactly one orientation remains
    pub const fn solved(&self) -> bool {
        self.possible.count_ones() == 1
    }

    /// The single remaining orientation mask, if solved
    pub const fn solved_mask(&self) -> Option<u8> {
        if self.solved() {
            Some(self.possible.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Whether every remaining orientation is a single-connector one
    pub const fn is_node(&self) -> bool {
        self.possible & !NODE_SET == 0
    }

    /// Number of orientations still possible
    pub const fn candidate_count(&self) -> usize {
        self.possible.count_ones() as usize
    }

    /// Whether the given orientation mask is still possible
    pub const fn contains(&self, mask: u8) -> bool {
        self.possible & (1 << (mask & 0xF)) != 0
    }

    /// Iterate the remaining orientation masks in ascending order
    pub fn possibilities(&self) -> impl Iterator<Item = u8> + '_ {
        (1u8..=0xF).filter(|&mask| self.possible & (1 << mask) != 0)
    }

    /// Tri-state connector query for one side; never mutates, never fails
    pub const fn connects(&self, dir: Direction) -> Connectivity {
        let pointing = self.possible & pointing_set(dir);
        if pointing == 0 {
            Connectivity::Disconnected
        } else if pointing == self.possible {
            Connectivity::Connected
        } else {
            Connectivity::Unknown
        }
    }

    /// Keep only orientations that carry a connector on `dir`
    ///
    /// Returns whether the set shrank.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` if no orientation would remain.
    pub fn must_point(&mut self, dir: Direction) -> Result<bool> {
        self.narrow(pointing_set(dir))
    }

    /// Remove every orientation that carries a connector on `dir`
    ///
    /// Returns whether the set shrank.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` if no orientation would remain.
    pub fn cant_point(&mut self, dir: Direction) -> Result<bool> {
        self.narrow(!pointing_set(dir))
    }

    /// Commit the tile to exactly one orientation
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` if the orientation is no longer possible.
    pub fn retain_exactly(&mut self, mask: u8) -> Result<bool> {
        self.narrow(1 << (mask & 0xF))
    }

    /// Permanently exclude one orientation from the set
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` if it was the last orientation.
    pub fn remove_exactly(&mut self, mask: u8) -> Result<bool> {
        self.narrow(!(1u16 << (mask & 0xF)))
    }

    fn narrow(&mut self, keep: u16) -> Result<bool> {
        let next = self.possible & keep;
        if next == 0 {
            return Err(illegal_state(self.x, self.y, Contradiction::EmptyPossibilities));
        }
        let changed = next != self.possible;
        self.possible = next;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Connectivity, Tile};
    use crate::io::error::{Contradiction, SolverError};
    use crate::puzzle::direction::Direction;

    #[test]
    fn test_archetype_rotation_counts() {
        assert_eq!(Tile::node().candidate_count(), 4);
        assert_eq!(Tile::line().candidate_count(), 2);
        assert_eq!(Tile::bend().candidate_count(), 4);
        assert_eq!(Tile::tee().candidate_count(), 4);
        assert_eq!(Tile::exact(0x9).candidate_count(), 1);
    }

    #[test]
    fn test_like_maps_every_seed_digit() {
        for mask in 1u8..=0xF {
            let tile = Tile::like(mask);
            if mask == 0xF {
                assert!(tile.is_none(), "a four-way connector has no archetype");
            } else {
                assert!(tile.is_some_and(|t| t.contains(mask)));
            }
        }
        assert!(Tile::like(0).is_none());
    }

    #[test]
    fn test_connects_is_tri_state() {
        let line = Tile::line();
        // Both rotations differ on every side, so everything is unknown
        for dir in Direction::ALL {
            assert_eq!(line.connects(dir), Connectivity::Unknown);
        }

        let bend = Tile::exact(0x9);
        assert_eq!(bend.connects(Direction::East), Connectivity::Connected);
        assert_eq!(bend.connects(Direction::South), Connectivity::Connected);
        assert_eq!(bend.connects(Direction::North), Connectivity::Disconnected);
        assert_eq!(bend.connects(Direction::West), Connectivity::Disconnected);
    }

    #[test]
    fn test_must_point_narrows() -> crate::Result<()> {
        let mut tile = Tile::bend();
        let changed = tile.must_point(Direction::North)?;
        assert!(changed);
        assert_eq!(tile.candidate_count(), 2);
        assert_eq!(tile.connects(Direction::North), Connectivity::Connected);

        // Already satisfied, so no further shrink
        assert!(!tile.must_point(Direction::North)?);
        Ok(())
    }

    #[test]
    fn test_cant_point_refuses_to_empty_the_set() -> crate::Result<()> {
        let mut tile = Tile::node();
        tile.cant_point(Direction::East)?;
        tile.cant_point(Direction::North)?;
        tile.cant_point(Direction::West)?;
        assert!(tile.solved());
        assert_eq!(tile.solved_mask(), Some(0x8));

        let err = tile.cant_point(Direction::South);
        assert!(matches!(
            err,
            Err(SolverError::IllegalBoardState {
                kind: Contradiction::EmptyPossibilities,
                ..
            })
        ));
        // The failed operation must not have silently emptied the set
        assert_eq!(tile.candidate_count(), 1);
        Ok(())
    }

    #[test]
    fn test_is_node_tracks_remaining_possibilities() -> crate::Result<()> {
        let mut node = Tile::node();
        assert!(node.is_node());
        node.cant_point(Direction::East)?;
        assert!(node.is_node());
        assert!(!Tile::bend().is_node());
        Ok(())
    }

    #[test]
    fn test_exact_commitment_and_exclusion() -> crate::Result<()> {
        let mut tile = Tile::bend();
        tile.remove_exactly(0x3)?;
        assert!(!tile.contains(0x3));
        tile.retain_exactly(0x9)?;
        assert_eq!(tile.solved_mask(), Some(0x9));
        assert!(tile.remove_exactly(0x9).is_err());
        Ok(())
    }
}
