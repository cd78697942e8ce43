//! Tail afterglow marking the last extent of the low band bar

use super::{center_pair, extent};
use crate::color::{Rgb, scale_color};
use crate::math8::step_toward;

/// Brightness lost per frame once the bar is gone
pub const DEFAULT_TAIL_DECAY: u8 = 15;
/// Pixels per frame the edges move back toward the bar or the center
pub const DEFAULT_TAIL_RETURN_SPEED: usize = 1;

/// How the tail reacts when the bar shrinks or disappears
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailDecayMode {
    /// Edges snap to the bar, the tail goes dark as soon as the bar is empty
    Instant,
    /// Edges creep inward and brightness fades out frame by frame
    #[default]
    Gradual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailConfig {
    /// Brightness subtracted per frame while no pixel is lit
    pub decay_step: u8,
    /// Maximum inward edge movement per frame
    pub return_speed: usize,
}

impl TailConfig {
    pub const fn new() -> Self {
        Self {
            decay_step: DEFAULT_TAIL_DECAY,
            return_speed: DEFAULT_TAIL_RETURN_SPEED,
        }
    }
}

impl Default for TailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Position and brightness of the tail markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailState {
    pub left: usize,
    pub right: usize,
    pub brightness: u8,
}

impl TailState {
    /// Dark tail resting at the center of a strip of `total` pixels
    pub const fn new(total: usize) -> Self {
        let (left, right) = center_pair(total);
        Self {
            left,
            right,
            brightness: 0,
        }
    }

    /// Follow the bar lit in the frame just rendered
    pub fn update(&mut self, lit: &[usize], total: usize, mode: TailDecayMode, config: &TailConfig) {
        let last = total.saturating_sub(1);
        match (extent(lit), mode) {
            (Some((min, max)), TailDecayMode::Instant) => {
                self.left = min.min(last);
                self.right = max.min(last);
                self.brightness = u8::MAX;
            }
            (None, TailDecayMode::Instant) => {
                self.brightness = 0;
            }
            (Some((min, max)), TailDecayMode::Gradual) => {
                // Jump outward immediately, creep inward slowly
                self.left = if min < self.left {
                    min
                } else {
                    step_toward(self.left, min, config.return_speed)
                };
                self.right = if max > self.right {
                    max.min(last)
                } else {
                    step_toward(self.right, max, config.return_speed)
                };
                self.brightness = u8::MAX;
            }
            (None, TailDecayMode::Gradual) => {
                let (center_left, center_right) = center_pair(total);
                self.brightness = self.brightness.saturating_sub(config.decay_step);
                self.left = step_toward(self.left, center_left, config.return_speed);
                self.right = step_toward(self.right, center_right, config.return_speed);
            }
        }
    }

    /// Draw both markers over the strip
    ///
    /// A dark tail leaves the strip untouched.
    pub fn draw(&self, strip: &mut [Rgb], color: Rgb) {
        if self.brightness == 0 {
            return;
        }
        let color = scale_color(color, self.brightness);
        for index in [self.left, self.right] {
            if let Some(pixel) = strip.get_mut(index) {
                *pixel = color;
            }
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.brightness > 0
    }
}
