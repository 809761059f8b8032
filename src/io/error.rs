//! Error types for solving, parsing, and export operations

use crate::puzzle::direction::Direction;
use std::fmt;
use std::path::PathBuf;

/// The specific invariant a board state violated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contradiction {
    /// A narrowing operation would leave a tile with zero orientations
    EmptyPossibilities,
    /// A certain connector faces a side that certainly does not connect back
    Mismatch(Direction),
    /// Solved tiles form a loop of connections
    Cycle,
    /// A solved region is sealed off from the rest of the board
    ClosedSubgraph,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPossibilities => write!(f, "no orientation remains possible"),
            Self::Mismatch(dir) => write!(f, "certain {dir} connector has no counterpart"),
            Self::Cycle => write!(f, "solved tiles form a closed loop"),
            Self::ClosedSubgraph => write!(f, "solved region is sealed off from the board"),
        }
    }
}

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// A mutation or consistency sweep found the board in an impossible state
    IllegalBoardState {
        /// Column of the offending tile
        x: usize,
        /// Row of the offending tile
        y: usize,
        /// Which invariant was violated
        kind: Contradiction,
    },

    /// Game identifier did not match the `WxH[w]:hexdigits` grammar
    UnrecognizedGameId {
        /// The identifier as supplied
        id: String,
    },

    /// Identifier declared a size that disagrees with its digit count
    TileCountMismatch {
        /// Tiles implied by the declared dimensions
        expected: usize,
        /// Tiles actually present in the identifier
        found: usize,
    },

    /// A seed digit does not describe a valid pipe tile
    InvalidSeedTile {
        /// Position of the digit within the identifier's tile section
        index: usize,
        /// The offending digit value
        value: u32,
    },

    /// Declared board dimensions exceed the configured maximum
    BoardTooLarge {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },

    /// Speculative search exceeded its recursion cap
    ///
    /// Treated as a fatal abort rather than a recoverable contradiction.
    SearchLimit {
        /// Depth at which the cap was hit
        depth: usize,
    },

    /// Visualization export was requested but no frames were captured
    EmptyCapture,

    /// Failed to save a rendered board or step animation
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalBoardState { x, y, kind } => {
                write!(f, "Illegal board state at ({x}, {y}): {kind}")
            }
            Self::UnrecognizedGameId { id } => {
                write!(f, "Unrecognized game identifier '{id}' (expected WxH[w]:hexdigits)")
            }
            Self::TileCountMismatch { expected, found } => {
                write!(f, "Identifier supplies {found} tiles but its size requires {expected}")
            }
            Self::InvalidSeedTile { index, value } => {
                write!(f, "Seed digit {index} has value {value}, not a valid tile")
            }
            Self::BoardTooLarge { width, height } => {
                write!(f, "Board size {width}x{height} exceeds the supported maximum")
            }
            Self::SearchLimit { depth } => {
                write!(f, "Speculative search aborted at depth {depth}")
            }
            Self::EmptyCapture => {
                write!(f, "No frames were captured for visualization")
            }
            Self::ImageExport { path, source } => {
                write!(f, "Failed to export image to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Create an illegal-board-state error for a tile position
pub const fn illegal_state(x: usize, y: usize, kind: Contradiction) -> SolverError {
    SolverError::IllegalBoardState { x, y, kind }
}
