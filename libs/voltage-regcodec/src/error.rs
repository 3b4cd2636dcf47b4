//! Error types for voltage-regcodec

use thiserror::Error;

use crate::format::ValueFormat;

/// Register codec errors
///
/// Every failing operation leaves caller-owned buffers untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Requested register window does not fit inside the buffer
    #[error(
        "Register window out of bounds: offset {offset} + {word_count} word(s) exceeds buffer length {len}"
    )]
    BoundsViolation {
        offset: usize,
        word_count: usize,
        len: usize,
    },

    /// Value does not fit the format's representable range
    #[error("Value {value} out of range for {format}")]
    RangeViolation { value: String, format: ValueFormat },

    /// Unknown format code, key, label or kind/width combination
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Text input that cannot be parsed for the format
    #[error("Invalid input for {format}: {input:?}")]
    InvalidInput { input: String, format: ValueFormat },

    #[error("The quantity of registers ({quantity}) is less than the format size ({word_count} for {format})")]
    InsufficientRegisters {
        quantity: usize,
        word_count: usize,
        format: ValueFormat,
    },

    #[error("Register quantity {requested} exceeds capacity {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("Row {row} out of range ({rows} row(s))")]
    RowOutOfRange { row: usize, rows: usize },
}

impl CodecError {
    pub fn range(value: impl ToString, format: ValueFormat) -> Self {
        Self::RangeViolation {
            value: value.to_string(),
            format,
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    pub fn invalid_input(input: impl Into<String>, format: ValueFormat) -> Self {
        Self::InvalidInput {
            input: input.into(),
            format,
        }
    }

    /// Whether the error stems from a caller-supplied value rather than
    /// a malformed request
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            CodecError::RangeViolation { .. } | CodecError::InvalidInput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
