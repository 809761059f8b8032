//! Command-line interface: parse an identifier, solve it, export results

use crate::io::configuration::GIF_FRAME_DELAY_MS;
use crate::io::error::Result;
use crate::io::image::export_board_png;
use crate::io::parser::GameId;
use crate::io::progress::ProgressReporter;
use crate::io::visualization::StepCapture;
use crate::solver::{SelectionPolicy, Solver};
use clap::Parser;
use std::io::Read as _;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipefit")]
#[command(
    author,
    version,
    about = "Solve pipe rotation puzzles by constraint propagation"
)]
/// Command-line arguments for the solver
pub struct Cli {
    /// Game identifier (WxH[w]:hexdigits); read from stdin when omitted
    #[arg(value_name = "GAME_ID")]
    pub game_id: Option<String>,

    /// Write the solved board as a PNG
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Write the unrotated seed as a PNG before solving
    #[arg(long, value_name = "PNG")]
    pub seed_preview: Option<PathBuf>,

    /// Record every solve step and write an animated GIF
    #[arg(short, long, value_name = "GIF")]
    pub visualize: Option<PathBuf>,

    /// Randomize speculative choices with this seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress and result output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates one solve from arguments to exported artifacts
pub struct SolveRunner {
    cli: Cli,
}

impl SolveRunner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse, solve, and export according to the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier cannot be parsed, the solve
    /// aborts, or any requested export fails.
    pub fn run(&self) -> Result<()> {
        let id = self.game_id()?;
        let game = GameId::parse(id.trim())?;

        if let Some(path) = &self.cli.seed_preview {
            export_board_png(&game.seed_preview()?, &path.to_string_lossy())?;
        }

        let policy = self
            .cli
            .seed
            .map_or(SelectionPolicy::Deterministic, SelectionPolicy::seeded);
        let mut solver = Solver::with_policy(game.board()?, policy);

        if self.cli.should_show_progress() {
            solver.attach_progress(ProgressReporter::new());
        }
        if self.cli.visualize.is_some() {
            solver.attach_capture(StepCapture::new());
        }

        let solved = solver.solve()?;

        if let Some(path) = &self.cli.output {
            export_board_png(solver.board(), &path.to_string_lossy())?;
        }
        if let Some(path) = &self.cli.visualize {
            if let Some(capture) = solver.take_capture() {
                capture.export_gif(&path.to_string_lossy(), GIF_FRAME_DELAY_MS)?;
            }
        }

        self.report(solved, &solver);
        Ok(())
    }

    fn game_id(&self) -> Result<String> {
        if let Some(id) = &self.cli.game_id {
            return Ok(id.clone());
        }
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }

    // Allow print for the user-facing result line
    #[allow(clippy::print_stdout)]
    fn report(&self, solved: bool, solver: &Solver) {
        if self.cli.quiet {
            return;
        }
        let stats = solver.stats();
        if solved {
            println!(
                "solved: {} rounds, {} speculations, {} rollbacks",
                stats.propagation_rounds, stats.speculations, stats.rollbacks
            );
        } else {
            println!("no solution exists for this seed");
        }
    }
}
