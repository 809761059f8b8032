//! Frame capture and GIF generation for solve visualization

use crate::io::error::{Result, SolverError};
use crate::io::image::render_board;
use crate::puzzle::board::Board;
use image::{DynamicImage, Frame, GrayImage};

/// What the solver just did when a frame was captured
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A propagation round narrowed at least one tile
    Propagated,
    /// A speculative orientation was committed
    Committed,
    /// A failed commitment was undone
    RolledBack,
}

/// One captured frame of board state
#[derive(Debug)]
pub struct StepFrame {
    event: StepEvent,
    image: GrayImage,
}

/// Captures board snapshots for visualization
///
/// Records a rendered frame after every propagation round, commitment,
/// and rollback so the finished solve can be replayed as an animation
#[derive(Debug, Default)]
pub struct StepCapture {
    frames: Vec<StepFrame>,
}

impl StepCapture {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the board and append it as a frame
    pub fn record(&mut self, board: &Board, event: StepEvent) {
        self.frames.push(StepFrame {
            event,
            image: render_board(board),
        });
    }

    /// The events captured so far, in order
    pub fn events(&self) -> impl Iterator<Item = StepEvent> + '_ {
        self.frames.iter().map(|frame| frame.event)
    }

    /// Number of captured frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If the requested frame rate exceeds what viewers reliably play,
    /// frames are dropped to keep the apparent animation speed. The
    /// final frame is held longer so the finished board stays visible.
    ///
    /// # Errors
    ///
    /// Returns an error if no frames were captured, the output directory
    /// cannot be created, or GIF encoding fails.
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;

        let Some(last) = self.frames.last() else {
            return Err(SolverError::EmptyCapture);
        };

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let mut frames = Vec::new();
        for (index, frame) in self.frames.iter().enumerate() {
            // Rollbacks always get a frame so failed branches stay visible
            if index % skip_factor == 0 || frame.event == StepEvent::RolledBack {
                frames.push(gif_frame(&frame.image, effective_delay_ms));
            }
        }

        // Final frame displays longer for better visibility
        frames.push(gif_frame(&last.image, effective_delay_ms * 25));

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| SolverError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SolverError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }
}

fn gif_frame(img: &GrayImage, delay_ms: u32) -> Frame {
    let rgba = DynamicImage::ImageLuma8(img.clone()).to_rgba8();
    Frame::from_parts(rgba, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}
