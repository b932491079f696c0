//! Tests for error construction, messages, and source chaining

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::io::error::{file_system, invalid_dimension, invalid_parameter};
    use std::error::Error;

    // Tests invalid parameter helper captures name, value, and reason
    // Verified by dropping the value from the message
    #[test]
    fn test_invalid_parameter_message() {
        let error = invalid_parameter("shift_factor", &-3, &"must be non-negative");

        assert!(matches!(
            &error,
            StereogramError::InvalidParameter { parameter: "shift_factor", value, .. } if value == "-3"
        ));
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'shift_factor' = '-3': must be non-negative"
        );
    }

    // Tests invalid dimension helper message
    // Verified by omitting the input name
    #[test]
    fn test_invalid_dimension_message() {
        let error = invalid_dimension("depth map", &"0x4 has no pixels");
        assert_eq!(
            error.to_string(),
            "Invalid dimension for depth map: 0x4 has no pixels"
        );
        assert!(error.source().is_none());
    }

    // Tests channel mismatch message
    // Verified by swapping expected and found
    #[test]
    fn test_dimension_mismatch_message() {
        let error = StereogramError::DimensionMismatch {
            expected: 3,
            found: 4,
        };
        assert_eq!(
            error.to_string(),
            "Channel mismatch: expected 3 channels, found 4"
        );
    }

    // Tests file system errors expose the underlying I/O error
    // Verified by removing the source attribute
    #[test]
    fn test_file_system_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = file_system("frames", "read directory", io_error);

        assert!(error.to_string().contains("read directory"));
        assert!(error.to_string().contains("frames"));
        assert!(error.source().is_some());
    }
}
