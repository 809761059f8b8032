//! Global consistency sweeps over a partially solved board
//!
//! Two independent checks run after every propagation fixpoint and every
//! speculative commitment. The mismatch sweep catches two tiles that
//! disagree about a connection one side considers certain. The flood
//! fill catches loops among solved tiles and solved regions sealed off
//! from the rest of the board. Together they require the converged
//! network to be a single spanning tree.

use crate::io::error::{Contradiction, Result, illegal_state};
use crate::puzzle::board::Board;
use crate::puzzle::direction::Direction;
use crate::puzzle::tile::{Connectivity, Tile};
use bitvec::prelude::{BitVec, bitvec};

/// Run both sweeps
///
/// # Errors
///
/// Returns `IllegalBoardState` naming the offending tile when a
/// mismatch, cycle, or closed subgraph is found.
pub fn check(board: &Board) -> Result<()> {
    check_mismatches(board)?;
    check_subgraphs(board)
}

/// A certain connector must face a side that could still connect back
///
/// A wrapped neighbor resolving to the tile itself imposes no pairing
/// constraint and is skipped; a certain connector facing a hard edge is
/// a mismatch like any other.
fn check_mismatches(board: &Board) -> Result<()> {
    for y in 0..board.height() {
        for x in 0..board.width() {
            let Some(tile) = board.tile(x, y) else {
                continue;
            };
            for dir in Direction::ALL {
                if tile.connects(dir) != Connectivity::Connected {
                    continue;
                }
                match board.neighbor_of(x, y, dir) {
                    None => return Err(illegal_state(x, y, Contradiction::Mismatch(dir))),
                    Some((nx, ny)) if (nx, ny) == (x, y) => {}
                    Some((nx, ny)) => {
                        let back = board
                            .tile(nx, ny)
                            .map_or(Connectivity::Disconnected, |n| n.connects(dir.opposite()));
                        if back == Connectivity::Disconnected {
                            return Err(illegal_state(x, y, Contradiction::Mismatch(dir)));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Flood fill over solved tiles along certain connections
///
/// Each fill starts from an unvisited solved tile and follows every
/// `Connected` direction. Reaching an unsolved tile is an open boundary
/// and ends that branch without error. Reaching an already visited tile
/// through anything but the arrival edge is a cycle. A fill that never
/// touches an open boundary while the board still has tiles outside the
/// filled region is a closed subgraph.
fn check_subgraphs(board: &Board) -> Result<()> {
    let total = board.tile_count();
    let mut visited: BitVec = bitvec![0; total];

    for start in 0..total {
        if visited.get(start).as_deref() == Some(&true) {
            continue;
        }
        let (sx, sy) = board.coords_of(start);
        if !board.tile(sx, sy).is_some_and(Tile::solved) {
            continue;
        }

        visited.set(start, true);
        let mut region = 1usize;
        let mut open_boundary = false;
        let mut stack: Vec<(usize, Option<Direction>)> = vec![(start, None)];

        while let Some((index, arrival)) = stack.pop() {
            let (x, y) = board.coords_of(index);
            let Some(tile) = board.tile(x, y) else {
                continue;
            };
            for dir in Direction::ALL {
                if tile.connects(dir) != Connectivity::Connected {
                    continue;
                }
                if arrival == Some(dir) {
                    // Edge we arrived through
                    continue;
                }
                let Some((nx, ny)) = board.neighbor_of(x, y, dir) else {
                    // Certain connector facing a hard edge; the mismatch
                    // sweep has already rejected this board
                    continue;
                };
                if (nx, ny) == (x, y) {
                    continue;
                }
                let Some(neighbor) = board.tile(nx, ny) else {
                    continue;
                };
                if !neighbor.solved() {
                    open_boundary = true;
                    continue;
                }
                let neighbor_index = board.flat_index(nx, ny);
                if visited.get(neighbor_index).as_deref() == Some(&true) {
                    return Err(illegal_state(x, y, Contradiction::Cycle));
                }
                visited.set(neighbor_index, true);
                region += 1;
                stack.push((neighbor_index, Some(dir.opposite())));
            }
        }

        if !open_boundary && region < total {
            return Err(illegal_state(sx, sy, Contradiction::ClosedSubgraph));
        }
    }
    Ok(())
}
