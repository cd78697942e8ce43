/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linearly map `value` from `0..=from_max` onto `0..=to_max`, rounding to
/// the nearest integer (halves round up).
///
/// Values above `from_max` are clamped to `to_max`.
#[inline]
pub const fn rescale(value: usize, from_max: usize, to_max: usize) -> usize {
    if from_max == 0 {
        return 0;
    }
    let value = if value > from_max { from_max } else { value };
    (value * to_max * 2 + from_max) / (from_max * 2)
}

/// Move `current` toward `target` by at most `step`
#[inline]
pub const fn step_toward(current: usize, target: usize, step: usize) -> usize {
    if current < target {
        let next = current.saturating_add(step);
        if next > target { target } else { next }
    } else {
        let next = current.saturating_sub(step);
        if next < target { target } else { next }
    }
}
