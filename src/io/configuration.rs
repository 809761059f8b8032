//! Rendering geometry, search limits, and output defaults

// Rendering geometry; a tile is a logical square scaled up for output
/// Logical tile edge length in unscaled pixels
pub const TILE_PIXELS: usize = 10;
/// Scale factor applied to the logical tile grid
pub const PIXEL_SCALE: usize = 4;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed board dimension
pub const MAX_BOARD_DIMENSION: usize = 10_000;

// A valid puzzle never needs anywhere near this many nested guesses;
// hitting the cap indicates a runaway branch and aborts the solve
/// Maximum nesting of speculative commitments
pub const MAX_SPECULATION_DEPTH: usize = 64;

// Output settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
