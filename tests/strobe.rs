mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_level_meter::strobe::{StrobeConfig, StrobeController};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_strobe_after_hold() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        for ms in 0..1000 {
            assert!(!strobe.tick(at(ms), 100), "strobing early at {ms} ms");
        }
        assert!(strobe.tick(at(1000), 100));
        assert_eq!(strobe.state().end_time, at(1250));
    }

    #[test]
    fn test_strobe_lasts_250ms() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        strobe.tick(at(0), 100);
        assert!(strobe.tick(at(1000), 100));
        assert!(strobe.tick(at(1249), 100));
        assert!(!strobe.tick(at(1250), 100));
        assert_eq!(strobe.state().last_change, Some(at(1250)));

        // The hold starts over after a strobe
        assert!(!strobe.tick(at(2249), 100));
        assert!(strobe.tick(at(2250), 100));
    }

    #[test]
    fn test_small_jitter_counts_as_static() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        strobe.tick(at(0), 100);
        strobe.tick(at(400), 108);
        strobe.tick(at(800), 92);
        assert!(strobe.tick(at(1000), 104));
    }

    #[test]
    fn test_drift_is_measured_from_last_change() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        strobe.tick(at(0), 100);
        strobe.tick(at(500), 108);
        // 116 is within tolerance of 108 but not of 100
        strobe.tick(at(600), 116);
        assert!(!strobe.tick(at(1000), 116));
        assert!(strobe.tick(at(1600), 116));
    }

    #[test]
    fn test_change_interrupts_strobe() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        strobe.tick(at(0), 100);
        assert!(strobe.tick(at(1000), 100));
        assert!(!strobe.tick(at(1100), 150));
        assert!(!strobe.is_active());
        assert!(!strobe.tick(at(2099), 150));
        assert!(strobe.tick(at(2100), 150));
    }

    #[test]
    fn test_flash_brightness_alternates() {
        let strobe = StrobeController::new(StrobeConfig::default());
        assert_eq!(strobe.flash_brightness(at(1000)), 255);
        assert_eq!(strobe.flash_brightness(at(1099)), 255);
        assert_eq!(strobe.flash_brightness(at(1100)), 0);
        assert_eq!(strobe.flash_brightness(at(1150)), 0);
        assert_eq!(strobe.flash_brightness(at(1200)), 255);
    }

    #[test]
    fn test_custom_timings() {
        let config = StrobeConfig {
            tolerance: 0,
            hold: Duration::from_millis(10),
            duration: Duration::from_millis(5),
            flash_period: Duration::from_millis(1),
        };
        let mut strobe = StrobeController::new(config);
        strobe.tick(at(0), 3);
        assert!(!strobe.tick(at(5), 4));
        assert!(strobe.tick(at(15), 4));
        assert!(!strobe.tick(at(20), 4));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut strobe = StrobeController::new(StrobeConfig::default());
        strobe.tick(at(0), 100);
        strobe.tick(at(1000), 100);
        strobe.reset();
        assert!(!strobe.is_active());
        assert_eq!(strobe.state().last_change, None);
    }
}
