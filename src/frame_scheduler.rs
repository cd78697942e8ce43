//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::{LevelRenderer, MatrixDriver, StripDriver};

/// Default frame duration, matching the 1 ms pause of the display loop.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1);

/// Number of frames we may fall behind before the backlog is skipped.
pub const MAX_DRIFT_FRAMES: u64 = 2;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether the matrix showed the idle strobe in this frame.
    pub strobing: bool,
}

/// Drives a [`LevelRenderer`] at a fixed cadence and pushes its frames to
/// the matrix and strip drivers.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, matrix, strip);
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    M: MatrixDriver,
    S: StripDriver,
    const STRIP_LEN: usize,
    const CHANNEL_SIZE: usize,
> {
    matrix: M,
    strip: S,
    renderer: LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, M: MatrixDriver, S: StripDriver, const STRIP_LEN: usize, const CHANNEL_SIZE: usize>
    FrameScheduler<'a, M, S, STRIP_LEN, CHANNEL_SIZE>
{
    /// Create a new frame scheduler using [`DEFAULT_FRAME_DURATION`].
    pub fn new(renderer: LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE>, matrix: M, strip: S) -> Self {
        Self::with_frame_duration(renderer, matrix, strip, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE>,
        matrix: M,
        strip: S,
        frame_duration: Duration,
    ) -> Self {
        Self {
            matrix,
            strip,
            renderer,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Render one frame, push it to both displays and return when the next
    /// one is due.
    ///
    /// After a stall longer than [`MAX_DRIFT_FRAMES`] frames the schedule
    /// restarts from `now` instead of rendering a burst of catch-up frames.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration.as_millis() * MAX_DRIFT_FRAMES;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let frame = self.renderer.render(now);
        let strobing = frame.strobing;
        self.matrix.write_matrix(frame.matrix);
        self.strip.write_strip(frame.strip);

        self.next_frame += self.frame_duration;

        let sleep_duration = Duration::from_millis(
            self.next_frame
                .as_millis()
                .saturating_sub(now.as_millis()),
        );

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            strobing,
        }
    }

    pub fn renderer(&self) -> &LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE> {
        &mut self.renderer
    }

    /// Give the drivers back, e.g. to inspect them in tests.
    pub fn into_parts(self) -> (LevelRenderer<'a, STRIP_LEN, CHANNEL_SIZE>, M, S) {
        (self.renderer, self.matrix, self.strip)
    }
}
