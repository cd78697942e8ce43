#![no_std]

pub mod channel;
pub mod color;
pub mod frame_scheduler;
pub mod input;
pub mod line_reader;
pub mod math8;
pub mod matrix;
pub mod renderer;
pub mod strip;
pub mod strobe;

pub use channel::{LevelChannel, LevelReceiver, LevelSender};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use input::{InputState, LevelSample, ParseError, encode_line, parse_line};
pub use line_reader::{LineError, LineReader};
pub use matrix::{MatrixFrame, OverlayMode};
pub use renderer::{Frame, LevelRenderer, LevelRendererConfig};
pub use strip::{HighStripMode, TailDecayMode, TailState};
pub use strobe::{StrobeConfig, StrobeController};

pub use color::{Palette, Rgb};
pub use embassy_time::{Duration, Instant};

/// 5x5 brightness matrix output
///
/// Implement this trait for the matrix display of the target board.
pub trait MatrixDriver {
    /// Show a complete brightness frame
    fn write_matrix(&mut self, frame: &MatrixFrame);
}

/// Addressable LED strip output
///
/// Implement this trait to support different hardware platforms.
pub trait StripDriver {
    /// Write colors to the LED strip
    fn write_strip(&mut self, colors: &[Rgb]);
}
