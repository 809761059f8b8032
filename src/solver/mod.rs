//! Solving engine: propagation, consistency checking, and search
//!
//! `Solver::solve` owns the control flow: an initial node-exclusion
//! pass, constraint propagation to a fixpoint interleaved with global
//! consistency sweeps, and snapshot-based speculative search for
//! whatever ambiguity propagation cannot resolve.

/// Mismatch and cycle/closed-subgraph detection
pub mod consistency;
/// Fixpoint constraint propagation
pub mod propagation;
/// Snapshot/rollback backtracking search
pub mod search;
/// Front-coalescing dirty-tile queue
pub mod worklist;

pub use search::SelectionPolicy;

use crate::io::error::{Result, SolverError};
use crate::io::progress::ProgressReporter;
use crate::io::visualization::{StepCapture, StepEvent};
use crate::puzzle::board::Board;
use crate::puzzle::direction::Direction;
use crate::puzzle::tile::{Connectivity, Tile};
use ndarray::Array2;

/// Counters describing the work a solve performed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Propagation rounds that narrowed at least one tile
    pub propagation_rounds: usize,
    /// Speculative commitments attempted
    pub speculations: usize,
    /// Commitments undone after a contradiction
    pub rollbacks: usize,
}

/// Drives one solve of one board
///
/// Owns the board, the LIFO snapshot stack backing speculative search,
/// and the optional step-capture and progress hooks. A solver is built
/// for a single solve; the snapshot stack is never shared.
pub struct Solver {
    board: Board,
    snapshots: Vec<Array2<Tile>>,
    policy: SelectionPolicy,
    stats: SolveStats,
    capture: Option<StepCapture>,
    progress: Option<ProgressReporter>,
}

impl Solver {
    /// Create a solver with the deterministic selection policy
    pub fn new(board: Board) -> Self {
        Self::with_policy(board, SelectionPolicy::Deterministic)
    }

    /// Create a solver with an explicit tile/orientation selection policy
    pub fn with_policy(board: Board, policy: SelectionPolicy) -> Self {
        Self {
            board,
            snapshots: Vec::new(),
            policy,
            stats: SolveStats::default(),
            capture: None,
            progress: None,
        }
    }

    /// Record a frame of board state after every meaningful step
    pub fn attach_capture(&mut self, capture: StepCapture) {
        self.capture = Some(capture);
    }

    /// Take back the step capture, typically after solving, for export
    pub fn take_capture(&mut self) -> Option<StepCapture> {
        self.capture.take()
    }

    /// Report solve activity through a progress bar
    pub fn attach_progress(&mut self, progress: ProgressReporter) {
        self.progress = Some(progress);
    }

    /// The board in its current state of reduction
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Work counters for the solve so far
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Solve the board in place
    ///
    /// Returns `Ok(true)` when every tile is reduced to a single
    /// orientation and the result is a spanning, acyclic network, and
    /// `Ok(false)` when speculative search exhausts every alternative,
    /// which means the puzzle as seeded has no valid solution.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` only when the initial deterministic
    /// pass contradicts itself, with no speculative context to roll back
    /// to; this indicates a malformed seed.
    pub fn solve(&mut self) -> Result<bool> {
        self.exclude_adjacent_nodes()?;
        self.propagate_to_fixpoint()?;

        let solved = if self.board.solved() {
            true
        } else {
            match self.speculate(0) {
                Ok(()) => true,
                Err(SolverError::IllegalBoardState { .. }) if self.snapshots.is_empty() => false,
                Err(err) => return Err(err),
            }
        };

        if let Some(progress) = self.progress.as_ref() {
            progress.finish(solved, &self.stats);
        }
        Ok(solved)
    }

    /// Forbid node tiles from pointing at adjacent node tiles
    ///
    /// Two single-connector tiles facing each other would form a sealed
    /// two-tile component, so the pairing is excluded up front; this is
    /// detectable without propagation and prunes many branches early.
    /// Only directions still `Unknown` are touched.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` if an exclusion would leave a tile
    /// with no orientations, which only happens for malformed seeds.
    pub fn exclude_adjacent_nodes(&mut self) -> Result<()> {
        for index in 0..self.board.tile_count() {
            let (x, y) = self.board.coords_of(index);
            if !self.board.tile(x, y).is_some_and(Tile::is_node) {
                continue;
            }
            for dir in Direction::ALL {
                let Some(tile) = self.board.tile(x, y) else {
                    break;
                };
                if tile.connects(dir) != Connectivity::Unknown {
                    continue;
                }
                let Some((nx, ny)) = self.board.neighbor_of(x, y, dir) else {
                    continue;
                };
                if !self.board.tile(nx, ny).is_some_and(Tile::is_node) {
                    continue;
                }
                if let Some(tile) = self.board.tile_mut(x, y) {
                    tile.cant_point(dir)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn record_step(&mut self, event: StepEvent) {
        if let Some(capture) = self.capture.as_mut() {
            capture.record(&self.board, event);
        }
    }

    pub(crate) fn note_progress(&self) {
        if let Some(progress) = self.progress.as_ref() {
            progress.update(&self.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Solver;
    use crate::puzzle::board::Board;
    use crate::puzzle::direction::Direction;
    use crate::puzzle::tile::{Connectivity, Tile};

    fn solver(width: usize, height: usize, wrapping: bool, tiles: Vec<Tile>) -> Solver {
        match Board::new(width, height, wrapping, tiles) {
            Ok(board) => Solver::new(board),
            Err(_) => unreachable!("tile count matches dimensions"),
        }
    }

    #[test]
    fn test_adjacent_nodes_are_excluded_before_propagation() -> crate::Result<()> {
        let mut solver = solver(2, 1, false, vec![Tile::node(), Tile::node()]);
        solver.exclude_adjacent_nodes()?;
        // Facing directions are gone while the edge constraints, which
        // only propagation applies, are still untouched
        let left = solver.board().tile(0, 0);
        let right = solver.board().tile(1, 0);
        assert!(left.is_some_and(|t| t.connects(Direction::East) == Connectivity::Disconnected));
        assert!(right.is_some_and(|t| t.connects(Direction::West) == Connectivity::Disconnected));
        assert!(left.is_some_and(|t| t.connects(Direction::North) == Connectivity::Unknown));
        Ok(())
    }

    #[test]
    fn test_exclusion_skips_decided_directions() -> crate::Result<()> {
        // The left tile is already committed toward its node neighbor;
        // the pass must not touch certain connectors
        let mut solver = solver(2, 1, false, vec![Tile::exact(0x1), Tile::node()]);
        solver.exclude_adjacent_nodes()?;
        let left = solver.board().tile(0, 0);
        assert!(left.is_some_and(|t| t.connects(Direction::East) == Connectivity::Connected));
        Ok(())
    }

    #[test]
    fn test_stats_start_at_zero() {
        let solver = solver(1, 1, false, vec![Tile::node()]);
        let stats = solver.stats();
        assert_eq!(stats.propagation_rounds, 0);
        assert_eq!(stats.speculations, 0);
        assert_eq!(stats.rollbacks, 0);
    }
}
