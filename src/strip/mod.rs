//! Pixel strip rendering
//!
//! The low band is drawn as a VU-meter bar growing from the middle of the
//! strip towards both ends. The high band is drawn either the same way or
//! starting at the tail edges, and the tail marks the last bar extent.

mod tail;

use heapless::Vec;

pub use tail::{DEFAULT_TAIL_DECAY, DEFAULT_TAIL_RETURN_SPEED, TailConfig, TailDecayMode, TailState};

use crate::color::Rgb;
use crate::math8::rescale;

/// Indices lit by one layer, at most N of them
pub type IndexSet<const N: usize> = Vec<usize, N>;

/// Where the high band is drawn on the strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighStripMode {
    /// Centered bar, same shape as the low band
    Symmetric,
    /// Grows outwards from the current tail edges
    #[default]
    FromTail,
}

/// Center pixel(s) of a strip of `total` pixels
///
/// Odd strips have a single center, so both values are equal.
pub const fn center_pair(total: usize) -> (usize, usize) {
    let left = total.saturating_sub(1) / 2;
    if total > 0 && total.is_multiple_of(2) {
        (left, left + 1)
    } else {
        (left, left)
    }
}

/// Number of pixels representing `level` on a strip of `total` pixels
pub const fn scale_to_count(level: u8, total: usize) -> usize {
    rescale(level as usize, u8::MAX as usize, total)
}

/// Light `count` pixels around the center of the strip
///
/// Pixels are taken alternately on the right and on the left of the center,
/// starting right next to it. On odd strips the center pixel is lit first,
/// so the bar stays symmetric within one pixel.
pub fn map_symmetric<const N: usize>(count: usize, total: usize) -> IndexSet<N> {
    let total = total.min(N);
    let count = count.min(total);
    let mut indices = IndexSet::new();
    if count == 0 {
        return indices;
    }

    let (center_left, center_right) = center_pair(total);
    let mut right = center_right;
    let mut left = Some(center_left);
    if center_left == center_right {
        let _ = indices.push(center_left);
        right += 1;
        left = center_left.checked_sub(1);
    }

    // count <= total, so both cursors together always reach it
    while indices.len() < count {
        if right < total {
            let _ = indices.push(right);
            right += 1;
        }
        if indices.len() < count {
            if let Some(index) = left {
                let _ = indices.push(index);
                left = index.checked_sub(1);
            }
        }
    }

    indices
}

/// Light up to `count` pixels starting at the tail edges and walking outward
///
/// Stops early when both edges have reached the strip ends. When the tail
/// edges coincide the shared pixel is lit once.
pub fn map_high_from_tail<const N: usize>(
    count: usize,
    tail_left: usize,
    tail_right: usize,
    total: usize,
) -> IndexSet<N> {
    let total = total.min(N);
    let count = count.min(total);
    let mut indices: IndexSet<N> = IndexSet::new();

    let mut left = (tail_left < total).then_some(tail_left);
    // The right cursor starts past the left one so both never visit the
    // same pixel
    let mut right = match left {
        Some(index) => tail_right.max(index + 1),
        None => tail_right,
    };

    while indices.len() < count && (left.is_some() || right < total) {
        if let Some(index) = left {
            let _ = indices.push(index);
            left = index.checked_sub(1);
        }
        if indices.len() < count && right < total {
            let _ = indices.push(right);
            right += 1;
        }
    }

    indices
}

/// Set every listed pixel to `color`, ignoring indices outside the strip
pub fn paint(strip: &mut [Rgb], indices: &[usize], color: Rgb) {
    for &index in indices {
        if let Some(pixel) = strip.get_mut(index) {
            *pixel = color;
        }
    }
}

/// Lowest and highest index of a set
pub fn extent(indices: &[usize]) -> Option<(usize, usize)> {
    let min = indices.iter().copied().min()?;
    let max = indices.iter().copied().max()?;
    Some((min, max))
}
