//! Constraint-propagation solver for pipe-rotation grid puzzles
//!
//! Each cell of a rectangular (optionally toroidal) board holds a pipe
//! segment that can be rotated into discrete orientations. The solver
//! narrows each tile's orientation possibilities by propagating connector
//! constraints between neighbors, validates the partially solved board for
//! mismatches and closed loops, and falls back to snapshot-based
//! speculative search when propagation alone cannot decide.

#![forbid(unsafe_code)]

/// Input/output operations, rendering, and error handling
pub mod io;
/// Board, tile, and direction domain model
pub mod puzzle;
/// Propagation, consistency checking, and speculative search
pub mod solver;

pub use io::error::{Result, SolverError};
