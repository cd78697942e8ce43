use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::LevelReceiver;
use crate::color::{Palette, Rgb, scale_color};
use crate::input::{InputState, LevelSample, ParseError};
use crate::matrix::{self, MatrixFrame, OverlayMode};
use crate::strip::{
    HighStripMode, IndexSet, TailConfig, TailDecayMode, TailState, map_high_from_tail,
    map_symmetric, paint, scale_to_count,
};
use crate::strobe::{StrobeConfig, StrobeController};

/// Configuration for the level renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRendererConfig {
    /// High band placement on the matrix
    pub overlay: OverlayMode,
    /// High band placement on the strip
    pub high_strip: HighStripMode,
    pub tail_decay: TailDecayMode,
    pub strobe: StrobeConfig,
    pub tail: TailConfig,
    pub palette: Palette,
}

impl LevelRendererConfig {
    /// Top row overlay, centered high band, tail snapping to the bar
    pub const fn classic() -> Self {
        Self {
            overlay: OverlayMode::SingleRow,
            high_strip: HighStripMode::Symmetric,
            tail_decay: TailDecayMode::Instant,
            strobe: StrobeConfig::new(),
            tail: TailConfig::new(),
            palette: Palette::new(),
        }
    }

    /// Column overlay, high band growing from the tail, fading tail
    pub const fn tail_anchored() -> Self {
        Self {
            overlay: OverlayMode::Column,
            high_strip: HighStripMode::FromTail,
            tail_decay: TailDecayMode::Gradual,
            strobe: StrobeConfig::new(),
            tail: TailConfig::new(),
            palette: Palette::new(),
        }
    }
}

impl Default for LevelRendererConfig {
    fn default() -> Self {
        Self::tail_anchored()
    }
}

/// One rendered frame for both displays
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub matrix: &'a MatrixFrame,
    pub strip: &'a [Rgb],
    /// The matrix shows the idle strobe instead of the bar graph
    pub strobing: bool,
}

/// Level renderer - turns the latest band levels into display frames
///
/// `STRIP_LEN` is the number of pixels on the strip, `CHANNEL_SIZE` the depth
/// of the sample channel it reads from.
pub struct LevelRenderer<'a, const STRIP_LEN: usize, const CHANNEL_SIZE: usize> {
    samples: Option<LevelReceiver<'a, CHANNEL_SIZE>>,
    config: LevelRendererConfig,

    input: InputState,
    strobe: StrobeController,
    tail: TailState,

    matrix: MatrixFrame,
    strip: [Rgb; STRIP_LEN],
}

impl<'a, const STRIP_LEN: usize, const CHANNEL_SIZE: usize>
    LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE>
{
    /// Create a renderer fed by a sample channel
    pub fn new(samples: LevelReceiver<'a, CHANNEL_SIZE>, config: &LevelRendererConfig) -> Self {
        let mut renderer = Self::without_channel(config);
        renderer.samples = Some(samples);
        renderer
    }

    /// Create a renderer fed only through [`Self::apply_line`] or
    /// [`Self::apply_sample`], for single-loop setups.
    pub fn without_channel(config: &LevelRendererConfig) -> Self {
        Self {
            samples: None,
            config: config.clone(),
            input: InputState::new(),
            strobe: StrobeController::new(config.strobe),
            tail: TailState::new(STRIP_LEN),
            matrix: [[0; matrix::MATRIX_SIZE]; matrix::MATRIX_SIZE],
            strip: [Rgb::default(); STRIP_LEN],
        }
    }

    /// Process one frame
    ///
    /// This is the main render loop step. Call this continuously.
    pub fn render(&mut self, now: Instant) -> Frame<'_> {
        self.process_samples();

        let strobing = self.strobe.tick(now, self.input.low());
        self.render_matrix(now, strobing);

        let lit = self.render_strip();
        // The tail drawn this frame still shows the previous extent
        self.tail.update(&lit, STRIP_LEN, self.config.tail_decay, &self.config.tail);

        Frame {
            matrix: &self.matrix,
            strip: &self.strip,
            strobing,
        }
    }

    /// Parse a protocol line and store it
    ///
    /// Malformed lines leave the current levels untouched.
    pub fn apply_line(&mut self, line: &str) -> Result<LevelSample, ParseError> {
        let result = self.input.apply_line(line);
        #[cfg(feature = "esp32-log")]
        if let Err(error) = result {
            println!("[LevelRenderer.apply_line] ignoring {:?}: {}", line, error);
        }
        result
    }

    pub fn apply_sample(&mut self, sample: LevelSample) {
        self.input.apply(sample);
    }

    /// Replace the configuration, keeping levels and animation state
    pub fn set_config(&mut self, config: &LevelRendererConfig) {
        if config.strobe != self.config.strobe {
            self.strobe = StrobeController::new(config.strobe);
        }
        self.config = config.clone();
    }

    pub const fn config(&self) -> &LevelRendererConfig {
        &self.config
    }

    pub const fn input(&self) -> &InputState {
        &self.input
    }

    pub const fn tail(&self) -> &TailState {
        &self.tail
    }

    pub const fn strobe(&self) -> &StrobeController {
        &self.strobe
    }

    /// Apply the newest queued sample; older ones are superseded anyway
    fn process_samples(&mut self) {
        let Some(samples) = &self.samples else {
            return;
        };
        if let Some(sample) = samples.take_latest() {
            self.input.apply(sample);
        }
    }

    fn render_matrix(&mut self, now: Instant, strobing: bool) {
        if strobing {
            matrix::fill(&mut self.matrix, self.strobe.flash_brightness(now));
            return;
        }

        matrix::render_bar(&mut self.matrix, self.input.low());
        if let Some(high) = self.input.high_level() {
            matrix::render_overlay(&mut self.matrix, high, self.config.overlay);
        }
    }

    /// Draw low band, high band and tail, in that order
    ///
    /// Returns the pixels lit by the low band.
    fn render_strip(&mut self) -> IndexSet<STRIP_LEN> {
        let palette = self.config.palette;
        self.strip.fill(Rgb::default());

        let low = self.input.low();
        let lit: IndexSet<STRIP_LEN> = map_symmetric(scale_to_count(low, STRIP_LEN), STRIP_LEN);
        paint(&mut self.strip, &lit, scale_color(palette.low, low));

        if let Some(high) = self.input.high_level() {
            let count = scale_to_count(high, STRIP_LEN);
            let high_lit: IndexSet<STRIP_LEN> = match self.config.high_strip {
                HighStripMode::Symmetric => map_symmetric(count, STRIP_LEN),
                HighStripMode::FromTail => {
                    map_high_from_tail(count, self.tail.left, self.tail.right, STRIP_LEN)
                }
            };
            paint(&mut self.strip, &high_lit, scale_color(palette.high, high));
        }

        self.tail.draw(&mut self.strip, palette.tail);

        lit
    }
}
