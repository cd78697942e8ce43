mod tests {
    use myrtio_level_meter::input::{
        InputState, LevelSample, ParseError, encode_line, parse_line,
    };

    fn state_with(low: u8, high: Option<u8>) -> InputState {
        let mut state = InputState::new();
        state.apply(LevelSample::new(low, high));
        state
    }

    #[test]
    fn test_parse_low_only() {
        assert_eq!(parse_line("128"), Ok(LevelSample::new(128, None)));
    }

    #[test]
    fn test_parse_low_and_high() {
        assert_eq!(parse_line("12,200"), Ok(LevelSample::new(12, Some(200))));
        assert_eq!(parse_line(" 12 ,\t200 \r"), Ok(LevelSample::new(12, Some(200))));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        assert_eq!(parse_line("300,400"), Ok(LevelSample::new(255, Some(255))));
    }

    #[test]
    fn test_parse_clamps_oversized_integers() {
        assert_eq!(
            parse_line("99999999999999999999"),
            Ok(LevelSample::new(255, None))
        );
        assert_eq!(
            parse_line("50,99999999999999999999"),
            Ok(LevelSample::new(50, Some(255)))
        );
        assert_eq!(parse_line("+7,0256"), Ok(LevelSample::new(7, Some(255))));
        assert_eq!(parse_line("-0"), Ok(LevelSample::new(0, None)));
    }

    #[test]
    fn test_parse_rejects_oversized_negative() {
        assert_eq!(
            parse_line("-99999999999999999999"),
            Err(ParseError::NegativeLow)
        );
        assert_eq!(parse_line("-"), Err(ParseError::InvalidLow));
        assert_eq!(parse_line("12a"), Err(ParseError::InvalidLow));
    }

    #[test]
    fn test_parse_rejects_bad_low() {
        assert_eq!(parse_line("abc"), Err(ParseError::InvalidLow));
        assert_eq!(parse_line(""), Err(ParseError::MissingLow));
        assert_eq!(parse_line("  ,40"), Err(ParseError::MissingLow));
        assert_eq!(parse_line("-5,30"), Err(ParseError::NegativeLow));
        assert_eq!(parse_line("1.5"), Err(ParseError::InvalidLow));
    }

    #[test]
    fn test_parse_bad_high_marks_unavailable() {
        assert_eq!(parse_line("50,xyz"), Ok(LevelSample::new(50, None)));
        assert_eq!(parse_line("50,-1"), Ok(LevelSample::new(50, None)));
        assert_eq!(parse_line("50,"), Ok(LevelSample::new(50, None)));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        assert_eq!(parse_line("1,2,3"), Ok(LevelSample::new(1, Some(2))));
    }

    #[test]
    fn test_apply_line_malformed_keeps_state() {
        let mut state = state_with(77, Some(9));
        assert!(state.apply_line("abc").is_err());
        assert!(state.apply_line("-5,30").is_err());
        assert_eq!(state, state_with(77, Some(9)));
    }

    #[test]
    fn test_apply_line_high_invalid_zeroes_high() {
        let mut state = state_with(10, Some(90));
        state.apply_line("50,xyz").unwrap();
        assert_eq!(state.low(), 50);
        assert_eq!(state.high(), 0);
        assert!(!state.high_available());
        assert_eq!(state.high_level(), None);
    }

    #[test]
    fn test_apply_line_sets_high() {
        let mut state = InputState::new();
        state.apply_line("300,400").unwrap();
        assert_eq!(state.low(), 255);
        assert_eq!(state.high_level(), Some(255));
    }

    #[test]
    fn test_encode_line() {
        assert_eq!(encode_line(&LevelSample::new(128, None)).unwrap().as_str(), "128\n");
        assert_eq!(
            encode_line(&LevelSample::new(0, Some(255))).unwrap().as_str(),
            "0,255\n"
        );
    }

    #[test]
    fn test_encoded_line_parses_back() {
        let sample = LevelSample::new(42, Some(7));
        let line = encode_line(&sample).unwrap();
        assert_eq!(parse_line(&line), Ok(sample));
    }
}
