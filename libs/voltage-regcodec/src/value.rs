//! Typed scalar values produced by decode and consumed by encode

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::format::{BitWidth, ValueFormat, ValueKind};

/// A decoded register value, tagged with its native type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ScalarValue {
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::I16(_) | Self::I32(_) | Self::I64(_) => ValueKind::Signed,
            Self::U16(_) | Self::U32(_) | Self::U64(_) => ValueKind::Unsigned,
            Self::F32(_) | Self::F64(_) => ValueKind::Float,
        }
    }

    pub fn width(&self) -> BitWidth {
        match self {
            Self::I16(_) | Self::U16(_) => BitWidth::W16,
            Self::I32(_) | Self::U32(_) | Self::F32(_) => BitWidth::W32,
            Self::I64(_) | Self::U64(_) | Self::F64(_) => BitWidth::W64,
        }
    }

    /// Raw two's-complement / IEEE bit pattern, zero-extended to 64 bits
    pub fn to_bits(&self) -> u64 {
        match *self {
            Self::I16(v) => u64::from(v as u16),
            Self::U16(v) => u64::from(v),
            Self::I32(v) => u64::from(v as u32),
            Self::U32(v) => u64::from(v),
            Self::I64(v) => v as u64,
            Self::U64(v) => v,
            Self::F32(v) => u64::from(v.to_bits()),
            Self::F64(v) => v.to_bits(),
        }
    }

    /// Equality on type and bit pattern, so NaN payloads compare equal to
    /// themselves and `0.0 != -0.0`
    pub fn bit_eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.to_bits() == other.to_bits()
    }

    /// Whether this value already has the native type of `format`
    pub fn matches_format(&self, format: ValueFormat) -> bool {
        self.kind() == format.kind() && self.width() == format.width()
    }

    /// Exact integer value, if the scalar is an integer or an integral float
    fn as_integer(&self) -> Option<i128> {
        match *self {
            Self::I16(v) => Some(i128::from(v)),
            Self::U16(v) => Some(i128::from(v)),
            Self::I32(v) => Some(i128::from(v)),
            Self::U32(v) => Some(i128::from(v)),
            Self::I64(v) => Some(i128::from(v)),
            Self::U64(v) => Some(i128::from(v)),
            Self::F32(v) => integral_float(f64::from(v)),
            Self::F64(v) => integral_float(v),
        }
    }

    /// Build the native scalar of an integer `format` from an exact integer
    pub fn from_integer(n: i128, format: ValueFormat) -> Result<Self> {
        let out_of_range = || CodecError::range(n, format);
        let value = match (format.kind(), format.width()) {
            (ValueKind::Signed, BitWidth::W16) => Self::I16(i16::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Signed, BitWidth::W32) => Self::I32(i32::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Signed, BitWidth::W64) => Self::I64(i64::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Unsigned, BitWidth::W16) => Self::U16(u16::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Unsigned, BitWidth::W32) => Self::U32(u32::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Unsigned, BitWidth::W64) => Self::U64(u64::try_from(n).map_err(|_| out_of_range())?),
            (ValueKind::Float, _) => return Self::from_float(n as f64, format),
        };
        Ok(value)
    }

    /// Build the native scalar of a float `format` from an `f64`
    ///
    /// Finite values that overflow binary32 are rejected; infinities and
    /// NaN pass through.
    pub fn from_float(v: f64, format: ValueFormat) -> Result<Self> {
        match (format.kind(), format.width()) {
            (ValueKind::Float, BitWidth::W64) => Ok(Self::F64(v)),
            (ValueKind::Float, _) => {
                let narrowed = v as f32;
                if v.is_finite() && narrowed.is_infinite() {
                    Err(CodecError::range(v, format))
                } else {
                    Ok(Self::F32(narrowed))
                }
            },
            _ => match integral_float(v) {
                Some(n) => Self::from_integer(n, format),
                None => Err(CodecError::range(v, format)),
            },
        }
    }

    /// Convert into the native type of `format`, checking its range
    ///
    /// Integers convert exactly or fail; floats convert into integer
    /// formats only when integral and in range; `F32` widens losslessly
    /// into 64-bit float formats.
    pub fn coerce(self, format: ValueFormat) -> Result<Self> {
        if self.matches_format(format) {
            return Ok(self);
        }
        match (self, format.kind()) {
            (Self::F32(v), ValueKind::Float) => Self::from_float(f64::from(v), format),
            (Self::F64(v), ValueKind::Float) => Self::from_float(v, format),
            (Self::F32(_) | Self::F64(_), _) => match self.as_integer() {
                Some(n) => Self::from_integer(n, format),
                None => Err(CodecError::range(self, format)),
            },
            (_, ValueKind::Float) => match self.as_integer() {
                Some(n) => Self::from_float(n as f64, format),
                None => Err(CodecError::range(self, format)),
            },
            _ => match self.as_integer() {
                Some(n) => Self::from_integer(n, format),
                None => Err(CodecError::range(self, format)),
            },
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::I16(v) => f64::from(v),
            Self::U16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::U32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::U64(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }
}

fn integral_float(v: f64) -> Option<i128> {
    // Bounded below i128::MAX; every 64-bit format range fits well inside.
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1.0e38 {
        Some(v as i128)
    } else {
        None
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I16(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$native> for ScalarValue {
                fn from(v: $native) -> Self {
                    ScalarValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_native!(
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_width() {
        assert_eq!(ScalarValue::I16(-1).kind(), ValueKind::Signed);
        assert_eq!(ScalarValue::U64(1).width(), BitWidth::W64);
        assert_eq!(ScalarValue::F32(1.0).width(), BitWidth::W32);
        assert!(ScalarValue::F64(0.5).matches_format(ValueFormat::Float64LeSwap));
        assert!(!ScalarValue::F64(0.5).matches_format(ValueFormat::Float32Le));
    }

    #[test]
    fn test_coerce_integer_ranges() {
        assert!(matches!(
            ScalarValue::I16(-1).coerce(ValueFormat::Unsigned16),
            Err(CodecError::RangeViolation { .. })
        ));
        assert_eq!(
            ScalarValue::I64(65535).coerce(ValueFormat::Hex16).unwrap(),
            ScalarValue::U16(0xFFFF)
        );
        assert_eq!(
            ScalarValue::U16(7).coerce(ValueFormat::Int64Le).unwrap(),
            ScalarValue::I64(7)
        );
        assert!(ScalarValue::U64(u64::MAX).coerce(ValueFormat::Int64Be).is_err());
        assert!(ScalarValue::I32(i32::MIN).coerce(ValueFormat::Int32Be).is_ok());
    }

    #[test]
    fn test_coerce_float_into_integer() {
        assert_eq!(
            ScalarValue::F64(42.0).coerce(ValueFormat::Uint32Be).unwrap(),
            ScalarValue::U32(42)
        );
        assert!(ScalarValue::F64(1.5).coerce(ValueFormat::Signed16).is_err());
        assert!(ScalarValue::F64(f64::NAN).coerce(ValueFormat::Signed16).is_err());
        assert!(ScalarValue::F32(70000.0).coerce(ValueFormat::Unsigned16).is_err());
    }

    #[test]
    fn test_coerce_into_float() {
        assert_eq!(
            ScalarValue::I16(-3).coerce(ValueFormat::Float32Be).unwrap(),
            ScalarValue::F32(-3.0)
        );
        assert_eq!(
            ScalarValue::F32(0.5).coerce(ValueFormat::Float64Be).unwrap(),
            ScalarValue::F64(0.5)
        );
        assert!(matches!(
            ScalarValue::F64(1.0e300).coerce(ValueFormat::Float32Be),
            Err(CodecError::RangeViolation { .. })
        ));
        let inf = ScalarValue::F64(f64::INFINITY).coerce(ValueFormat::Float32Le).unwrap();
        assert_eq!(inf, ScalarValue::F32(f32::INFINITY));
    }

    #[test]
    fn test_bit_eq() {
        let nan = ScalarValue::F32(f32::from_bits(0x7FC0_0001));
        assert!(nan.bit_eq(&nan));
        assert_ne!(nan, nan);
        assert!(!ScalarValue::F64(0.0).bit_eq(&ScalarValue::F64(-0.0)));
        assert!(!ScalarValue::U16(1).bit_eq(&ScalarValue::I16(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarValue::I32(-5).to_string(), "-5");
        assert_eq!(ScalarValue::F64(2.5).to_string(), "2.5");
        assert_eq!(ScalarValue::from(7u16).to_string(), "7");
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_string(&ScalarValue::U32(9)).unwrap();
        assert_eq!(json, r#"{"type":"u32","value":9}"#);
    }
}
