//! Error types shared by the pixel transforms.

use thiserror::Error;

/// Errors reported by the pixel transforms.
///
/// Every transform validates its inputs before touching a pixel, so when one
/// of these is returned the destination buffer is exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Source and destination buffers disagree on size, or pixel data does
    /// not match the declared dimensions.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A parameter is outside its valid domain (non-positive radius,
    /// non-positive or non-finite scale factor, and so on).
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

impl TransformError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        TransformError::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = TransformError::DimensionMismatch {
            expected: (4, 3),
            actual: (2, 2),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected (4, 3), got (2, 2)"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = TransformError::invalid("radius", 0);
        assert_eq!(err.to_string(), "Invalid parameter `radius`: 0");
    }
}
