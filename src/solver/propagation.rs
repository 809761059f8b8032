//! Fixpoint constraint propagation driven by a dirty-tile work list
//!
//! For every direction a tile is still undecided about, three rules
//! apply: a hard board edge forbids the connector; a neighbor whose
//! facing side is certain forces the connector; a neighbor whose facing
//! side certainly lacks a connector forbids it. Whenever a tile narrows,
//! its neighbors move to the front of the work list so changes spread
//! outward before far-away tiles are revisited, which converges in
//! near-linear time instead of repeated full-board rescans.

use crate::io::error::Result;
use crate::io::visualization::StepEvent;
use crate::puzzle::direction::Direction;
use crate::puzzle::tile::{Connectivity, Tile};
use crate::solver::worklist::WorkList;
use crate::solver::{Solver, consistency};

impl Solver {
    /// Propagate neighbor constraints until nothing narrows
    ///
    /// Each drained work list is followed by a consistency sweep; the
    /// two interleave for as long as changes occur. Returns whether any
    /// tile narrowed at all, so callers can detect a converged board.
    ///
    /// # Errors
    ///
    /// Returns `IllegalBoardState` when a narrowing empties a tile's
    /// possibility set or a consistency sweep finds a violation.
    pub fn propagate_to_fixpoint(&mut self) -> Result<bool> {
        let mut narrowed_any = false;
        loop {
            let mut narrowed_this_round = false;
            let mut work = self.seed_worklist();
            while let Some(index) = work.pop_front() {
                if self.relax_tile(index, &mut work)? {
                    narrowed_this_round = true;
                }
            }
            consistency::check(&self.board)?;
            if !narrowed_this_round {
                break;
            }
            narrowed_any = true;
            self.stats.propagation_rounds += 1;
            self.record_step(StepEvent::Propagated);
            self.note_progress();
        }
        Ok(narrowed_any)
    }

    fn seed_worklist(&self) -> WorkList {
        let board = &self.board;
        let mut work = WorkList::new(board.tile_count());
        for index in 0..board.tile_count() {
            let (x, y) = board.coords_of(index);
            if !board.tile(x, y).is_some_and(Tile::solved) {
                work.push_back(index);
            }
        }
        work
    }

    /// Apply every available inference to one tile
    ///
    /// Returns whether its possibility set shrank.
    fn relax_tile(&mut self, index: usize, work: &mut WorkList) -> Result<bool> {
        let (x, y) = self.board.coords_of(index);
        let mut narrowed = false;

        for dir in Direction::ALL {
            let Some(tile) = self.board.tile(x, y) else {
                break;
            };
            if tile.connects(dir) != Connectivity::Unknown {
                continue;
            }

            let inference = match self.board.neighbor_of(x, y, dir) {
                // A tile cannot connect off the edge of the board
                None => Some(false),
                // A wrapped neighbor that is the tile itself imposes nothing
                Some((nx, ny)) if (nx, ny) == (x, y) => None,
                Some((nx, ny)) => {
                    match self.board.tile(nx, ny).map(|n| n.connects(dir.opposite())) {
                        Some(Connectivity::Connected) => Some(true),
                        Some(Connectivity::Disconnected) => Some(false),
                        _ => None,
                    }
                }
            };
            let Some(must) = inference else {
                continue;
            };

            let changed = match self.board.tile_mut(x, y) {
                Some(tile) if must => tile.must_point(dir)?,
                Some(tile) => tile.cant_point(dir)?,
                None => false,
            };
            if changed {
                narrowed = true;
                self.requeue_neighbors(x, y, work);
            }
        }
        Ok(narrowed)
    }

    /// Push all four neighbors of a narrowed tile to the queue front
    fn requeue_neighbors(&self, x: usize, y: usize, work: &mut WorkList) {
        let board = &self.board;
        for dir in Direction::ALL {
            if let Some((nx, ny)) = board.neighbor_of(x, y, dir) {
                work.promote_front(board.flat_index(nx, ny));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::puzzle::board::Board;
    use crate::puzzle::direction::Direction;
    use crate::puzzle::tile::{Connectivity, Tile};
    use crate::solver::Solver;

    fn solver(width: usize, height: usize, wrapping: bool, tiles: Vec<Tile>) -> Solver {
        match Board::new(width, height, wrapping, tiles) {
            Ok(board) => Solver::new(board),
            Err(_) => unreachable!("tile count matches dimensions"),
        }
    }

    #[test]
    fn test_edges_forbid_connectors() -> crate::Result<()> {
        // On a non-wrapping 1x2 column only the shared side may connect
        let mut solver = solver(1, 2, false, vec![Tile::node(), Tile::node()]);
        solver.propagate_to_fixpoint()?;
        let top = solver.board().tile(0, 0);
        let bottom = solver.board().tile(0, 1);
        assert!(top.is_some_and(|t| t.solved_mask() == Some(0x8)));
        assert!(bottom.is_some_and(|t| t.solved_mask() == Some(0x2)));
        Ok(())
    }

    #[test]
    fn test_certain_neighbors_force_reciprocation() -> crate::Result<()> {
        // A solved east connector forces the right-hand tile to point west
        let mut solver = solver(2, 1, false, vec![Tile::exact(0x1), Tile::node()]);
        solver.propagate_to_fixpoint()?;
        let right = solver.board().tile(1, 0);
        assert!(right.is_some_and(|t| t.solved_mask() == Some(0x4)));
        Ok(())
    }

    #[test]
    fn test_fixpoint_is_idempotent() -> crate::Result<()> {
        let mut solver = solver(2, 1, false, vec![Tile::exact(0x1), Tile::node()]);
        let first = solver.propagate_to_fixpoint()?;
        assert!(first);
        let second = solver.propagate_to_fixpoint()?;
        assert!(!second, "a converged board must not change again");
        Ok(())
    }

    #[test]
    fn test_possibility_sets_never_grow() -> crate::Result<()> {
        let mut solver = solver(
            2,
            2,
            false,
            vec![Tile::bend(), Tile::node(), Tile::bend(), Tile::node()],
        );
        let before: Vec<usize> = solver
            .board()
            .iter_tiles()
            .map(Tile::candidate_count)
            .collect();
        solver.propagate_to_fixpoint()?;
        for (index, tile) in solver.board().iter_tiles().enumerate() {
            let limit = before.get(index).copied().unwrap_or(0);
            assert!(tile.candidate_count() <= limit);
        }
        Ok(())
    }

    #[test]
    fn test_self_neighbor_imposes_nothing() -> crate::Result<()> {
        // Vertical directions on a 1-tall wrapping board wrap to the tile
        // itself and must not generate inferences
        let mut solver = solver(2, 1, true, vec![Tile::line(), Tile::line()]);
        solver.propagate_to_fixpoint()?;
        let tile = solver.board().tile(0, 0);
        assert!(tile.is_some_and(|t| t.connects(Direction::North) == Connectivity::Unknown));
        Ok(())
    }
}
