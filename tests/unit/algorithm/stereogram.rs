//! Tests for stereogram reconstruction, validation, and edge-case policies

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::algorithm::stereogram::{AutostereogramEngine, StereogramConfig, generate};
    use ndarray::{Array2, Array3, s};

    fn ramp_pattern(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
            (y * 31 + x * 7 + c * 3 + 1) as u8
        })
    }

    // Tests default configuration uses a shift factor of 20
    // Verified by changing the default
    #[test]
    fn test_default_config() {
        assert_eq!(StereogramConfig::default().shift_factor, 20);
        let engine = AutostereogramEngine::default();
        assert_eq!(engine.config(), StereogramConfig::default());
    }

    // Tests negative shift factors are rejected at construction
    // Verified by removing the sign check
    #[test]
    fn test_negative_shift_factor_rejected() {
        let result = AutostereogramEngine::new(StereogramConfig { shift_factor: -1 });
        assert!(matches!(
            result,
            Err(StereogramError::InvalidParameter {
                parameter: "shift_factor",
                ..
            })
        ));

        let depth = Array2::<u8>::zeros((2, 4));
        let pattern = ramp_pattern(2, 2);
        assert!(generate(&depth.view(), &pattern.view(), -5).is_err());
    }

    // Tests empty depth maps and patterns are rejected
    // Verified by skipping depth map validation
    #[test]
    fn test_empty_inputs_rejected() {
        let pattern = ramp_pattern(2, 2);
        let empty_depth = Array2::<u8>::zeros((0, 4));
        assert!(matches!(
            generate(&empty_depth.view(), &pattern.view(), 20),
            Err(StereogramError::InvalidDimension { .. })
        ));

        let depth = Array2::<u8>::zeros((2, 4));
        let empty_pattern = Array3::<u8>::zeros((2, 0, 3));
        assert!(matches!(
            generate(&depth.view(), &empty_pattern.view(), 20),
            Err(StereogramError::InvalidDimension { .. })
        ));
    }

    // Tests patterns with the wrong channel count are rejected
    // Verified by accepting any positive channel count
    #[test]
    fn test_channel_mismatch_rejected() {
        let depth = Array2::<u8>::zeros((2, 4));
        let rgba = Array3::<u8>::zeros((2, 2, 4));

        assert!(matches!(
            generate(&depth.view(), &rgba.view(), 20),
            Err(StereogramError::DimensionMismatch {
                expected: 3,
                found: 4
            })
        ));
    }

    // Tests canvas takes depth map extent and pattern channels
    // Verified by sizing the canvas from the pattern
    #[test]
    fn test_canvas_dimensions() {
        let depth = Array2::<u8>::zeros((9, 17));
        let pattern = ramp_pattern(4, 5);

        let canvas = generate(&depth.view(), &pattern.view(), 3).unwrap();
        assert_eq!(canvas.dim(), (9, 17, 3));
    }

    // Tests patterns taller than the depth map are cropped for the seed
    // Verified by seeding from the bottom rows
    #[test]
    fn test_taller_pattern_is_cropped() {
        let depth = Array2::<u8>::zeros((3, 8));
        let pattern = ramp_pattern(6, 4);

        let canvas = generate(&depth.view(), &pattern.view(), 2).unwrap();
        assert_eq!(
            canvas.slice(s![.., ..4, ..]),
            pattern.slice(s![..3, .., ..])
        );
    }

    // Tests patterns wider than the canvas only seed existing columns
    // Verified by seeding the full pattern width
    #[test]
    fn test_wider_pattern_is_clipped() {
        let depth = Array2::<u8>::from_elem((2, 3), 200);
        let pattern = ramp_pattern(2, 5);

        let canvas = generate(&depth.view(), &pattern.view(), 2).unwrap();
        assert_eq!(canvas, pattern.slice(s![.., ..3, ..]));
    }

    // Tests pixels whose shift does not point left stay black
    // Verified by clamping the shift into range
    #[test]
    fn test_unresolved_pixels_stay_black() {
        let depth = Array2::<u8>::from_elem((2, 6), 255);
        let pattern = ramp_pattern(2, 2);

        let canvas = generate(&depth.view(), &pattern.view(), 10).unwrap();
        assert!(canvas.slice(s![.., 2.., ..]).iter().all(|&v| v == 0));
        assert_eq!(canvas.slice(s![.., ..2, ..]), pattern);
    }

    // Tests inputs are left untouched
    // Verified by writing the canvas into the pattern buffer
    #[test]
    fn test_inputs_not_modified() {
        let depth = Array2::from_shape_fn((4, 12), |(y, x)| ((x * 20 + y) % 256) as u8);
        let pattern = ramp_pattern(2, 4);
        let depth_before = depth.clone();
        let pattern_before = pattern.clone();

        let engine = AutostereogramEngine::new(StereogramConfig { shift_factor: 3 }).unwrap();
        engine.generate(&depth.view(), &pattern.view()).unwrap();

        assert_eq!(depth, depth_before);
        assert_eq!(pattern, pattern_before);
    }

    // Tests the engine's shift field uses its configured shift factor
    // Verified by ignoring the configured factor
    #[test]
    fn test_engine_shift_field() {
        let depth = Array2::<u8>::from_elem((1, 10), 255);
        let engine = AutostereogramEngine::new(StereogramConfig { shift_factor: 4 }).unwrap();

        let field = engine.shift_field(&depth.view(), 5);
        assert_eq!(field.get(0, 5), Some(4));
        assert_eq!(field.source_column(0, 9), Some(8));
    }
}
