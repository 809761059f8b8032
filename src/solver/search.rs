//! Speculative search with snapshot rollback
//!
//! When propagation converges on an unsolved board, the solver commits
//! one still-ambiguous tile to one of its remaining orientations and
//! propagates again. A contradiction anywhere below that commitment
//! rolls the board back to the snapshot taken just before it and the
//! failed orientation is excluded permanently, so the same branch is
//! never explored twice.

use crate::io::configuration::MAX_SPECULATION_DEPTH;
use crate::io::error::{Result, SolverError};
use crate::io::visualization::StepEvent;
use crate::puzzle::board::Board;
use crate::puzzle::tile::Tile;
use crate::solver::Solver;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy for picking the next speculative commitment
///
/// The deterministic policy makes solves reproducible without any seed
/// and is the default; the seeded policy randomizes branch order, which
/// can escape pathological orderings on adversarial boards.
#[derive(Debug)]
pub enum SelectionPolicy {
    /// Lowest-index unsolved tile, orientations in ascending mask order
    Deterministic,
    /// Uniformly random tile and orientation from a seeded generator
    Seeded(StdRng),
}

impl SelectionPolicy {
    /// A randomized policy reproducible from the given seed
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Pick an unsolved tile and one of its remaining orientations
    ///
    /// Returns `None` only when every tile is already solved.
    pub fn choose(&mut self, board: &Board) -> Option<(usize, usize, u8)> {
        match self {
            Self::Deterministic => {
                let tile = board.iter_tiles().find(|tile| !tile.solved())?;
                let mask = tile.possibilities().next()?;
                Some((tile.x(), tile.y(), mask))
            }
            Self::Seeded(rng) => {
                let unsolved: Vec<&Tile> = board.iter_tiles().filter(|t| !t.solved()).collect();
                if unsolved.is_empty() {
                    return None;
                }
                let tile = unsolved.get(rng.random_range(0..unsolved.len()))?;
                let masks: Vec<u8> = tile.possibilities().collect();
                let mask = masks.get(rng.random_range(0..masks.len())).copied()?;
                Some((tile.x(), tile.y(), mask))
            }
        }
    }
}

impl Solver {
    /// Resolve a converged but unsolved board by trial commitment
    ///
    /// Each loop iteration snapshots the board, commits one orientation,
    /// and recurses through [`Solver::propagate_to_fixpoint`]. On a
    /// contradiction the snapshot is restored and the orientation is
    /// excluded; exclusion itself can solve the tile and unlock further
    /// propagation before the next commitment is tried.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` when every orientation of the chosen
    /// tile has been excluded, handing the contradiction to the caller
    /// one level up, and `SearchLimit` past the recursion cap.
    pub(crate) fn speculate(&mut self, depth: usize) -> Result<()> {
        if depth >= MAX_SPECULATION_DEPTH {
            return Err(SolverError::SearchLimit { depth });
        }

        loop {
            let Some((x, y, mask)) = self.policy.choose(&self.board) else {
                return Ok(());
            };

            self.snapshots.push(self.board.snapshot());
            match self.attempt(x, y, mask, depth) {
                Ok(()) => {
                    self.snapshots.pop();
                    return Ok(());
                }
                Err(SolverError::IllegalBoardState { .. }) => {
                    if let Some(snapshot) = self.snapshots.pop() {
                        self.board.restore(snapshot);
                    }
                    self.stats.rollbacks += 1;
                    self.record_step(StepEvent::RolledBack);
                    self.note_progress();

                    // Emptying the set here means this branch point is
                    // exhausted; the error surfaces to the level above
                    if let Some(tile) = self.board.tile_mut(x, y) {
                        tile.remove_exactly(mask)?;
                    }
                    self.propagate_to_fixpoint()?;
                    if self.board.solved() {
                        return Ok(());
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Commit one orientation and push the solve forward
    fn attempt(&mut self, x: usize, y: usize, mask: u8, depth: usize) -> Result<()> {
        if let Some(tile) = self.board.tile_mut(x, y) {
            tile.retain_exactly(mask)?;
        }
        self.stats.speculations += 1;
        self.record_step(StepEvent::Committed);
        self.note_progress();

        self.propagate_to_fixpoint()?;
        if self.board.solved() {
            Ok(())
        } else {
            self.speculate(depth + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionPolicy;
    use crate::io::visualization::{StepCapture, StepEvent};
    use crate::puzzle::board::Board;
    use crate::puzzle::tile::Tile;
    use crate::solver::Solver;

    fn board(width: usize, height: usize, wrapping: bool, tiles: Vec<Tile>) -> Board {
        match Board::new(width, height, wrapping, tiles) {
            Ok(board) => board,
            Err(_) => unreachable!("tile count matches dimensions"),
        }
    }

    #[test]
    fn test_deterministic_policy_picks_lowest_index_and_mask() {
        let board = board(
            2,
            1,
            false,
            vec![Tile::from_masks(&[0x6, 0x9]), Tile::line()],
        );
        let mut policy = SelectionPolicy::Deterministic;
        assert_eq!(policy.choose(&board), Some((0, 0, 0x6)));
    }

    #[test]
    fn test_choose_returns_none_on_a_solved_board() {
        let board = board(2, 1, false, vec![Tile::exact(0x1), Tile::exact(0x4)]);
        for mut policy in [SelectionPolicy::Deterministic, SelectionPolicy::seeded(7)] {
            assert_eq!(policy.choose(&board), None);
        }
    }

    #[test]
    fn test_seeded_policy_chooses_a_live_possibility() {
        let board = board(
            2,
            2,
            false,
            vec![Tile::line(), Tile::bend(), Tile::exact(0x2), Tile::tee()],
        );
        let mut policy = SelectionPolicy::seeded(42);
        for _ in 0..32 {
            let Some((x, y, mask)) = policy.choose(&board) else {
                unreachable!("board has unsolved tiles");
            };
            let tile = board.tile(x, y);
            assert!(tile.is_some_and(|t| !t.solved() && t.contains(mask)));
        }
    }

    #[test]
    fn test_failed_commitment_rolls_back_and_excludes() -> crate::Result<()> {
        // The lowest-ordered choice at (0, 0) seals off a two-tile
        // component with the node below it, so the first commitment must
        // fail a global sweep and be undone before the alternative wins
        let tiles = vec![
            Tile::from_masks(&[0x8, 0x9]),
            Tile::from_masks(&[0x8, 0xC]),
            Tile::exact(0x2),
            Tile::exact(0x2),
        ];
        let mut solver = Solver::new(board(2, 2, false, tiles));

        assert!(solver.solve()?);
        let stats = solver.stats();
        assert_eq!(stats.speculations, 1);
        assert_eq!(stats.rollbacks, 1);

        let top_left = solver.board().tile(0, 0);
        let top_right = solver.board().tile(1, 0);
        assert!(top_left.is_some_and(|t| t.solved_mask() == Some(0x9)));
        assert!(top_right.is_some_and(|t| t.solved_mask() == Some(0xC)));
        assert!(solver.snapshots.is_empty());
        Ok(())
    }

    #[test]
    fn test_captured_steps_replay_the_failed_branch() -> crate::Result<()> {
        let tiles = vec![
            Tile::from_masks(&[0x8, 0x9]),
            Tile::from_masks(&[0x8, 0xC]),
            Tile::exact(0x2),
            Tile::exact(0x2),
        ];
        let mut solver = Solver::new(board(2, 2, false, tiles));
        solver.attach_capture(StepCapture::new());

        assert!(solver.solve()?);
        let Some(capture) = solver.take_capture() else {
            unreachable!("capture was attached");
        };
        // Initial propagation changes nothing, so the first frame is the
        // doomed commitment, then its rollback, then the winning cascade
        let events: Vec<StepEvent> = capture.events().collect();
        assert_eq!(
            events,
            vec![
                StepEvent::Committed,
                StepEvent::RolledBack,
                StepEvent::Propagated
            ]
        );
        Ok(())
    }

    #[test]
    fn test_single_speculation_resolves_a_symmetric_wrap() -> crate::Result<()> {
        // Propagation alone cannot split the bend at (0, 0); one
        // commitment cascades to a full solution with no rollback
        let tiles = vec![
            Tile::from_masks(&[0x3, 0x9]),
            Tile::exact(0xC),
            Tile::node(),
            Tile::exact(0x2),
        ];
        let mut solver = Solver::new(board(2, 2, true, tiles));

        assert!(solver.solve()?);
        let stats = solver.stats();
        assert_eq!(stats.speculations, 1);
        assert_eq!(stats.rollbacks, 0);
        assert!(solver.board().solved());
        Ok(())
    }
}
