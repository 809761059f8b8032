//! Grayscale board rendering and PNG export
//!
//! Tiles are drawn on a shared one-pixel grid. A tine is drawn from the
//! tile center toward each side the tile connects on: full width when
//! the connection is certain, half width while it is still undecided,
//! and nothing once it is ruled out. Solved tiles get a darker
//! background so partial progress is visible at a glance.

use crate::io::configuration::{PIXEL_SCALE, TILE_PIXELS};
use crate::io::error::{Result, SolverError};
use crate::puzzle::board::Board;
use crate::puzzle::direction::Direction;
use crate::puzzle::tile::{Connectivity, Tile};
use image::{GrayImage, Luma};

// Sixteen-step gray ramp
const GRAY_STEP: u8 = 17;
const UNSOLVED_BACKGROUND: u8 = 15 * GRAY_STEP;
const SOLVED_BACKGROUND: u8 = 11 * GRAY_STEP;
const BORDER: u8 = 8 * GRAY_STEP;
const TINE: u8 = 3 * GRAY_STEP;

/// Scaled edge length of one tile, excluding the shared border line
const fn tile_edge() -> usize {
    TILE_PIXELS * PIXEL_SCALE
}

/// Render the board in its current state of reduction
pub fn render_board(board: &Board) -> GrayImage {
    let edge = tile_edge();
    let width = (board.width() * edge + 1) as u32;
    let height = (board.height() * edge + 1) as u32;
    let mut img = GrayImage::from_pixel(width, height, Luma([BORDER]));

    for y in 0..board.height() {
        for x in 0..board.width() {
            if let Some(tile) = board.tile(x, y) {
                draw_tile(&mut img, tile, x * edge, y * edge);
            }
        }
    }
    img
}

fn draw_tile(img: &mut GrayImage, tile: &Tile, ox: usize, oy: usize) {
    let edge = tile_edge();
    let center = edge / 2;
    let background = if tile.solved() {
        SOLVED_BACKGROUND
    } else {
        UNSOLVED_BACKGROUND
    };
    fill_rect(img, ox + 1, oy + 1, ox + edge - 1, oy + edge - 1, background);

    let (cx, cy) = (ox + center, oy + center);
    let full = PIXEL_SCALE - 1;
    let half = PIXEL_SCALE / 2;

    for dir in Direction::ALL {
        // Certain connections get a full-width tine, undecided ones a
        // half-width hint
        let (lo, hi) = match tile.connects(dir) {
            Connectivity::Connected => (full, full),
            Connectivity::Unknown => (half, half.saturating_sub(1)),
            Connectivity::Disconnected => continue,
        };
        match dir {
            Direction::East => fill_rect(img, cx, cy - lo, ox + edge, cy + hi, TINE),
            Direction::West => fill_rect(img, ox, cy - lo, cx, cy + hi, TINE),
            Direction::North => fill_rect(img, cx - lo, oy, cx + hi, cy, TINE),
            Direction::South => fill_rect(img, cx - lo, cy, cx + hi, oy + edge, TINE),
        }
    }

    // Center hub ties the tines together
    fill_rect(img, cx - full, cy - full, cx + full, cy + full, TINE);
}

// Inclusive rectangle fill, clamped to the image
fn fill_rect(img: &mut GrayImage, x0: usize, y0: usize, x1: usize, y1: usize, level: u8) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            if let Some(pixel) = img.get_pixel_mut_checked(x as u32, y as u32) {
                *pixel = Luma([level]);
            }
        }
    }
}

/// Export the board as a grayscale PNG
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created and
/// `ImageExport` if encoding or saving fails.
pub fn export_board_png(board: &Board, output_path: &str) -> Result<()> {
    let img = render_board(board);

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| SolverError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}
