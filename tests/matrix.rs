mod tests {
    use myrtio_level_meter::matrix::{
        MATRIX_SIZE, MatrixFrame, OverlayMode, bar_brightness, render_bar, render_overlay,
        total_brightness,
    };

    const EMPTY: MatrixFrame = [[0; MATRIX_SIZE]; MATRIX_SIZE];

    #[test]
    fn test_bar_brightness_steps() {
        assert_eq!(bar_brightness(0, 0), 0);
        assert_eq!(bar_brightness(50, 0), 255);
        assert_eq!(bar_brightness(51, 0), 255);
        assert_eq!(bar_brightness(51, 1), 0);
        assert_eq!(bar_brightness(128, 1), 255);
        assert_eq!(bar_brightness(128, 2), 133);
        assert_eq!(bar_brightness(128, 3), 0);
        assert_eq!(bar_brightness(255, 4), 255);
    }

    #[test]
    fn test_render_bar_fills_from_bottom() {
        let mut frame = EMPTY;
        render_bar(&mut frame, 128);
        assert_eq!(frame[4], [255; MATRIX_SIZE]);
        assert_eq!(frame[3], [255; MATRIX_SIZE]);
        assert_eq!(frame[2], [133; MATRIX_SIZE]);
        assert_eq!(frame[1], [0; MATRIX_SIZE]);
        assert_eq!(frame[0], [0; MATRIX_SIZE]);
    }

    #[test]
    fn test_full_level_lights_everything() {
        let mut frame = EMPTY;
        render_bar(&mut frame, 255);
        assert_eq!(frame, [[255; MATRIX_SIZE]; MATRIX_SIZE]);
    }

    #[test]
    fn test_total_brightness_is_monotonic() {
        let mut previous = 0;
        for level in 0..=255u8 {
            let mut frame = EMPTY;
            render_bar(&mut frame, level);
            let total = total_brightness(&frame);
            assert!(total >= previous, "level {level} dimmer than level {}", level - 1);
            previous = total;
        }
    }

    #[test]
    fn test_single_row_overlay_keeps_brighter_cells() {
        let mut frame = EMPTY;
        render_bar(&mut frame, 255);
        render_overlay(&mut frame, 90, OverlayMode::SingleRow);
        assert_eq!(frame[0], [255; MATRIX_SIZE]);

        let mut frame = EMPTY;
        render_bar(&mut frame, 10);
        render_overlay(&mut frame, 90, OverlayMode::SingleRow);
        assert_eq!(frame[0], [90; MATRIX_SIZE]);
        assert_eq!(frame[1], [0; MATRIX_SIZE]);
    }

    #[test]
    fn test_column_overlay_draws_own_bar() {
        let mut frame = EMPTY;
        render_overlay(&mut frame, 60, OverlayMode::Column);
        let column: Vec<u8> = frame.iter().map(|row| row[4]).collect();
        assert_eq!(column, vec![0, 0, 0, 46, 255]);
        assert!(frame.iter().all(|row| row[..4].iter().all(|&cell| cell == 0)));
    }

    #[test]
    fn test_column_overlay_merges_with_max() {
        let mut frame = EMPTY;
        render_bar(&mut frame, 128);
        render_overlay(&mut frame, 60, OverlayMode::Column);
        let column: Vec<u8> = frame.iter().map(|row| row[4]).collect();
        assert_eq!(column, vec![0, 0, 133, 255, 255]);
    }
}
