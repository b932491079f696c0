//! Tests for generation constants and defaults

#[cfg(test)]
mod tests {
    use autostereo::io::configuration::{
        BINARIZE_THRESHOLD, CHANNELS, DEFAULT_CRF, DEFAULT_NUM_CLIPS, DEFAULT_SHIFT_FACTOR,
        FALLBACK_FRAME_RATE, MAX_CRF, MAX_DEPTH, OUTPUT_SUFFIX, VIDEO_CODEC,
    };

    // Tests generation defaults
    // Verified by changing constant values
    #[test]
    fn test_generation_defaults() {
        assert_eq!(DEFAULT_SHIFT_FACTOR, 20);
        assert_eq!(DEFAULT_NUM_CLIPS, 8);
        assert_eq!(CHANNELS, 3);
        assert_eq!(MAX_DEPTH, 255);
        assert_eq!(BINARIZE_THRESHOLD, 128);
    }

    // Tests encoder defaults are in range
    // Verified by setting the CRF above the encoder maximum
    #[test]
    fn test_encoder_defaults() {
        assert_eq!(DEFAULT_CRF, 25);
        assert_eq!(MAX_CRF, 51);
        assert_eq!(VIDEO_CODEC, "libx264");
        assert!((FALLBACK_FRAME_RATE - 30.0).abs() < f64::EPSILON);
    }

    // Tests filesystem safety of suffix
    // Verified by adding special character
    #[test]
    fn test_output_suffix_format() {
        assert!(OUTPUT_SUFFIX.starts_with('_'));
        for ch in OUTPUT_SUFFIX.chars() {
            assert!(
                ch.is_alphanumeric() || ch == '_' || ch == '-',
                "Output suffix contains invalid character: {ch}"
            );
        }
    }
}
