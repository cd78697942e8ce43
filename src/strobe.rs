//! Idle strobe
//!
//! When the low band holds still (within a small tolerance) for long enough
//! the matrix switches to a short full-brightness flash. Any real change of
//! the level cancels a running strobe immediately.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Largest level change still considered "static"
pub const DEFAULT_TOLERANCE: u8 = 8;
/// How long the level has to stay static before strobing
pub const DEFAULT_HOLD: Duration = Duration::from_millis(1000);
/// How long a strobe lasts
pub const DEFAULT_STROBE_DURATION: Duration = Duration::from_millis(250);
/// Half period of the flash (on for one period, off for the next)
pub const DEFAULT_FLASH_PERIOD: Duration = Duration::from_millis(100);

/// Strobe timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrobeConfig {
    pub tolerance: u8,
    pub hold: Duration,
    pub duration: Duration,
    pub flash_period: Duration,
}

impl StrobeConfig {
    pub const fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            hold: DEFAULT_HOLD,
            duration: DEFAULT_STROBE_DURATION,
            flash_period: DEFAULT_FLASH_PERIOD,
        }
    }
}

impl Default for StrobeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the strobe state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrobeState {
    pub active: bool,
    pub end_time: Instant,
    pub last_level: u8,
    /// `None` until the first tick
    pub last_change: Option<Instant>,
}

/// Normal / Strobing state machine driven by the low band level
#[derive(Debug, Clone)]
pub struct StrobeController {
    config: StrobeConfig,
    state: StrobeState,
}

impl StrobeController {
    pub const fn new(config: StrobeConfig) -> Self {
        Self {
            config,
            state: StrobeState {
                active: false,
                end_time: Instant::from_millis(0),
                last_level: 0,
                last_change: None,
            },
        }
    }

    /// Advance the state machine by one frame
    ///
    /// Returns `true` while strobing.
    pub fn tick(&mut self, now: Instant, level: u8) -> bool {
        let state = &mut self.state;
        let Some(last_change) = state.last_change else {
            state.last_level = level;
            state.last_change = Some(now);
            return false;
        };

        if level.abs_diff(state.last_level) > self.config.tolerance {
            state.last_level = level;
            state.last_change = Some(now);
            state.active = false;
        } else if state.active {
            if now >= state.end_time {
                #[cfg(feature = "esp32-log")]
                println!("[StrobeController.tick] strobe finished");
                state.active = false;
                state.last_level = level;
                state.last_change = Some(now);
            }
        } else if now.saturating_duration_since(last_change) >= self.config.hold {
            #[cfg(feature = "esp32-log")]
            println!("[StrobeController.tick] level {} held, strobing", level);
            state.active = true;
            state.end_time = now + self.config.duration;
        }

        state.active
    }

    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    pub const fn state(&self) -> &StrobeState {
        &self.state
    }

    /// Flash brightness for the whole matrix at `now`
    pub fn flash_brightness(&self, now: Instant) -> u8 {
        let period = self.config.flash_period.as_millis().max(1);
        if (now.as_millis() / period).is_multiple_of(2) {
            u8::MAX
        } else {
            0
        }
    }

    /// Forget all history, as if no frame had been rendered yet
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}
