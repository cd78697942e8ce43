//! 5x5 brightness matrix rendering
//!
//! A level in 0-255 is drawn as a five step bar graph growing from the
//! bottom row. Each step covers 51 levels; the step currently being filled
//! is lit proportionally, so the bar moves smoothly instead of jumping
//! between rows.

/// Width and height of the LED matrix
pub const MATRIX_SIZE: usize = 5;

/// Number of levels covered by one bar step (255 / 5)
pub const LEVELS_PER_STEP: u8 = 51;

/// Column used by [`OverlayMode::Column`]
pub const HIGH_BAND_COLUMN: usize = MATRIX_SIZE - 1;

/// Row used by [`OverlayMode::SingleRow`]
pub const HIGH_BAND_ROW: usize = 0;

/// Brightness grid indexed as `[y][x]`, `y = 0` being the top row
pub type MatrixFrame = [[u8; MATRIX_SIZE]; MATRIX_SIZE];

/// Where the high band is drawn on the matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlayMode {
    /// The whole top row glows with the high band level
    SingleRow,
    /// The rightmost column shows its own bar graph of the high band
    #[default]
    Column,
}

/// Brightness of the cell `step` rows above the bottom for `level`
///
/// Steps below the bar are fully lit, the partial step is scaled from its
/// remainder (0-50 mapped onto 0-255), steps above are dark.
#[allow(clippy::cast_possible_truncation)]
pub const fn bar_brightness(level: u8, step: usize) -> u8 {
    let full_steps = (level / LEVELS_PER_STEP) as usize;
    let remainder = level % LEVELS_PER_STEP;

    if step < full_steps {
        u8::MAX
    } else if step == full_steps {
        // remainder <= 50, so the result never exceeds 255
        ((remainder as u16 * 255 + 25) / (LEVELS_PER_STEP as u16 - 1)) as u8
    } else {
        0
    }
}

/// Fill every cell with the same brightness
pub fn fill(frame: &mut MatrixFrame, brightness: u8) {
    *frame = [[brightness; MATRIX_SIZE]; MATRIX_SIZE];
}

/// Draw the low band bar graph across all columns
pub fn render_bar(frame: &mut MatrixFrame, level: u8) {
    for (y, row) in frame.iter_mut().enumerate() {
        let brightness = bar_brightness(level, MATRIX_SIZE - 1 - y);
        row.fill(brightness);
    }
}

/// Draw the high band on top of the existing frame
///
/// Cells keep the brighter of their current value and the overlay.
pub fn render_overlay(frame: &mut MatrixFrame, level: u8, mode: OverlayMode) {
    match mode {
        OverlayMode::SingleRow => {
            for cell in &mut frame[HIGH_BAND_ROW] {
                *cell = (*cell).max(level);
            }
        }
        OverlayMode::Column => {
            for (y, row) in frame.iter_mut().enumerate() {
                let brightness = bar_brightness(level, MATRIX_SIZE - 1 - y);
                let cell = &mut row[HIGH_BAND_COLUMN];
                *cell = (*cell).max(brightness);
            }
        }
    }
}

/// Sum of all cell brightness values
pub fn total_brightness(frame: &MatrixFrame) -> u32 {
    frame
        .iter()
        .flat_map(|row| row.iter())
        .map(|&cell| u32::from(cell))
        .sum()
}
