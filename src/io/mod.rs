//! Parsing, rendering, progress display, and the command-line front end

/// Command-line arguments and the solve runner
pub mod cli;
/// Rendering geometry and runtime limits
pub mod configuration;
/// Error types for solving, parsing, and export
pub mod error;
/// Board rendering and PNG export
pub mod image;
/// Game identifier parsing
pub mod parser;
/// Progress display for a running solve
pub mod progress;
/// Step capture and GIF generation
pub mod visualization;
