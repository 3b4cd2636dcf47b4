//! Value format catalogue
//!
//! A [`ValueFormat`] names one of the 28 ways a register window can be read
//! as a scalar. Each variant decomposes into a [`FormatSpec`]: the value
//! kind, bit width, byte order and the display style used when rendering.
//!
//! Numeric codes follow the register-width split of the catalogue:
//! 16-bit formats are `0..=3`, 32-bit formats `32..=43` and 64-bit formats
//! `64..=75`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::byte_order::ByteOrder;
use crate::error::CodecError;

/// Interpretation of the assembled bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Signed,
    Unsigned,
    Float,
}

/// Bit width of a scalar, always a whole number of registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitWidth {
    W16,
    W32,
    W64,
}

impl BitWidth {
    pub const fn bits(self) -> u32 {
        match self {
            BitWidth::W16 => 16,
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
        }
    }

    /// Number of 16-bit registers covered by this width
    pub const fn word_count(self) -> usize {
        (self.bits() / 16) as usize
    }

    pub const fn byte_count(self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// How a decoded value is rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStyle {
    Decimal,
    Hex,
    Binary,
}

/// Decomposition of a [`ValueFormat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatSpec {
    pub kind: ValueKind,
    pub width: BitWidth,
    pub byte_order: ByteOrder,
    pub style: DisplayStyle,
}

macro_rules! value_formats {
    ($(
        $(#[$meta:meta])*
        $variant:ident = $code:literal, $key:literal, $label:literal,
            $kind:ident, $width:ident, $order:ident, $style:ident;
    )*) => {
        /// Closed set of register value formats
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ValueFormat {
            $(
                $(#[$meta])*
                #[serde(rename = $key)]
                $variant,
            )*
        }

        impl ValueFormat {
            /// Every format, in catalogue order
            pub const ALL: &'static [ValueFormat] = &[$(ValueFormat::$variant,)*];

            pub const fn spec(self) -> FormatSpec {
                match self {
                    $(ValueFormat::$variant => FormatSpec {
                        kind: ValueKind::$kind,
                        width: BitWidth::$width,
                        byte_order: ByteOrder::$order,
                        style: DisplayStyle::$style,
                    },)*
                }
            }

            /// Stable numeric code
            pub const fn code(self) -> u8 {
                match self {
                    $(ValueFormat::$variant => $code,)*
                }
            }

            /// Configuration key, e.g. `int32-be-swap`
            pub const fn key(self) -> &'static str {
                match self {
                    $(ValueFormat::$variant => $key,)*
                }
            }

            /// Human-readable label, e.g. `Int32 Big-endian byte swap`
            pub const fn label(self) -> &'static str {
                match self {
                    $(ValueFormat::$variant => $label,)*
                }
            }
        }

        impl TryFrom<u8> for ValueFormat {
            type Error = CodecError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(ValueFormat::$variant),)*
                    other => Err(CodecError::unsupported(format!("format code {}", other))),
                }
            }
        }
    };
}

value_formats! {
    /// Signed 16-bit decimal
    Signed16 = 0, "signed", "Signed", Signed, W16, BigEndian, Decimal;
    /// Unsigned 16-bit decimal
    Unsigned16 = 1, "unsigned", "Unsigned", Unsigned, W16, BigEndian, Decimal;
    /// Unsigned 16-bit shown as 4 hex digits
    Hex16 = 2, "hex", "Hex", Unsigned, W16, BigEndian, Hex;
    /// Unsigned 16-bit shown as 16 binary digits
    Binary16 = 3, "binary", "Binary", Unsigned, W16, BigEndian, Binary;

    Int32Be = 32, "int32-be", "Int32 Big-endian", Signed, W32, BigEndian, Decimal;
    Int32Le = 33, "int32-le", "Int32 Little-endian", Signed, W32, LittleEndian, Decimal;
    Int32BeSwap = 34, "int32-be-swap", "Int32 Big-endian byte swap", Signed, W32, BigEndianSwap, Decimal;
    Int32LeSwap = 35, "int32-le-swap", "Int32 Little-endian byte swap", Signed, W32, LittleEndianSwap, Decimal;
    Uint32Be = 36, "uint32-be", "UInt32 Big-endian", Unsigned, W32, BigEndian, Decimal;
    Uint32Le = 37, "uint32-le", "UInt32 Little-endian", Unsigned, W32, LittleEndian, Decimal;
    Uint32BeSwap = 38, "uint32-be-swap", "UInt32 Big-endian byte swap", Unsigned, W32, BigEndianSwap, Decimal;
    Uint32LeSwap = 39, "uint32-le-swap", "UInt32 Little-endian byte swap", Unsigned, W32, LittleEndianSwap, Decimal;
    Float32Be = 40, "float-be", "Float Big-endian", Float, W32, BigEndian, Decimal;
    Float32Le = 41, "float-le", "Float Little-endian", Float, W32, LittleEndian, Decimal;
    Float32BeSwap = 42, "float-be-swap", "Float Big-endian byte swap", Float, W32, BigEndianSwap, Decimal;
    Float32LeSwap = 43, "float-le-swap", "Float Little-endian byte swap", Float, W32, LittleEndianSwap, Decimal;

    Int64Be = 64, "int64-be", "Int64 Big-endian", Signed, W64, BigEndian, Decimal;
    Int64Le = 65, "int64-le", "Int64 Little-endian", Signed, W64, LittleEndian, Decimal;
    Int64BeSwap = 66, "int64-be-swap", "Int64 Big-endian byte swap", Signed, W64, BigEndianSwap, Decimal;
    Int64LeSwap = 67, "int64-le-swap", "Int64 Little-endian byte swap", Signed, W64, LittleEndianSwap, Decimal;
    Uint64Be = 68, "uint64-be", "UInt64 Big-endian", Unsigned, W64, BigEndian, Decimal;
    Uint64Le = 69, "uint64-le", "UInt64 Little-endian", Unsigned, W64, LittleEndian, Decimal;
    Uint64BeSwap = 70, "uint64-be-swap", "UInt64 Big-endian byte swap", Unsigned, W64, BigEndianSwap, Decimal;
    Uint64LeSwap = 71, "uint64-le-swap", "UInt64 Little-endian byte swap", Unsigned, W64, LittleEndianSwap, Decimal;
    Float64Be = 72, "double-be", "Double Big-endian", Float, W64, BigEndian, Decimal;
    Float64Le = 73, "double-le", "Double Little-endian", Float, W64, LittleEndian, Decimal;
    Float64BeSwap = 74, "double-be-swap", "Double Big-endian byte swap", Float, W64, BigEndianSwap, Decimal;
    Float64LeSwap = 75, "double-le-swap", "Double Little-endian byte swap", Float, W64, LittleEndianSwap, Decimal;
}

impl ValueFormat {
    pub const fn kind(self) -> ValueKind {
        self.spec().kind
    }

    pub const fn width(self) -> BitWidth {
        self.spec().width
    }

    pub const fn byte_order(self) -> ByteOrder {
        self.spec().byte_order
    }

    pub const fn style(self) -> DisplayStyle {
        self.spec().style
    }

    /// Number of consecutive registers one value occupies
    pub const fn word_count(self) -> usize {
        self.spec().width.word_count()
    }

    /// Look up the decimal-style format for a kind/width/order triple
    ///
    /// 16-bit formats only exist in big-endian order, and floats only in
    /// 32 and 64 bits.
    pub fn from_parts(kind: ValueKind, width: BitWidth, order: ByteOrder) -> Result<Self, CodecError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| {
                let spec = f.spec();
                spec.kind == kind
                    && spec.width == width
                    && spec.byte_order == order
                    && spec.style == DisplayStyle::Decimal
            })
            .ok_or_else(|| {
                CodecError::unsupported(format!(
                    "{:?} {}-bit with {}",
                    kind,
                    width.bits(),
                    order
                ))
            })
    }

    /// The same kind and width with a different byte order
    pub fn with_byte_order(self, order: ByteOrder) -> Result<Self, CodecError> {
        if self.width() == BitWidth::W16 {
            return if order == ByteOrder::BigEndian {
                Ok(self)
            } else {
                Err(CodecError::unsupported(format!(
                    "{} has no {} variant",
                    self.label(),
                    order
                )))
            };
        }
        Self::from_parts(self.kind(), self.width(), order)
    }
}

impl fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValueFormat {
    type Err = CodecError;

    /// Accepts a configuration key or a label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(wanted) || f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CodecError::unsupported(format!("format {:?}", s)))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_size_and_uniqueness() {
        assert_eq!(ValueFormat::ALL.len(), 28);

        let codes: HashSet<u8> = ValueFormat::ALL.iter().map(|f| f.code()).collect();
        let keys: HashSet<&str> = ValueFormat::ALL.iter().map(|f| f.key()).collect();
        let labels: HashSet<&str> = ValueFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(codes.len(), 28);
        assert_eq!(keys.len(), 28);
        assert_eq!(labels.len(), 28);
    }

    #[test]
    fn test_code_ranges_match_word_count() {
        for format in ValueFormat::ALL {
            let expected = match format.code() {
                0..=31 => 1,
                32..=63 => 2,
                _ => 4,
            };
            assert_eq!(format.word_count(), expected, "{}", format);
        }
    }

    #[test]
    fn test_code_roundtrip_and_unknown() {
        for format in ValueFormat::ALL {
            assert_eq!(ValueFormat::try_from(format.code()).unwrap(), *format);
        }
        assert!(matches!(
            ValueFormat::try_from(4),
            Err(CodecError::UnsupportedFormat(_))
        ));
        assert!(ValueFormat::try_from(76).is_err());
    }

    #[test]
    fn test_floats_never_16_bit() {
        for format in ValueFormat::ALL {
            if format.kind() == ValueKind::Float {
                assert_ne!(format.width(), BitWidth::W16);
            }
        }
        assert!(ValueFormat::from_parts(ValueKind::Float, BitWidth::W16, ByteOrder::BigEndian).is_err());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            ValueFormat::from_parts(ValueKind::Unsigned, BitWidth::W32, ByteOrder::LittleEndianSwap)
                .unwrap(),
            ValueFormat::Uint32LeSwap
        );
        assert_eq!(
            ValueFormat::from_parts(ValueKind::Unsigned, BitWidth::W16, ByteOrder::BigEndian).unwrap(),
            ValueFormat::Unsigned16
        );
        assert!(
            ValueFormat::from_parts(ValueKind::Signed, BitWidth::W16, ByteOrder::LittleEndian).is_err()
        );
    }

    #[test]
    fn test_with_byte_order() {
        assert_eq!(
            ValueFormat::Float32Be.with_byte_order(ByteOrder::BigEndianSwap).unwrap(),
            ValueFormat::Float32BeSwap
        );
        assert_eq!(
            ValueFormat::Hex16.with_byte_order(ByteOrder::BigEndian).unwrap(),
            ValueFormat::Hex16
        );
        assert!(ValueFormat::Hex16.with_byte_order(ByteOrder::LittleEndian).is_err());
    }

    #[test]
    fn test_from_str_key_and_label() {
        assert_eq!("int32-be-swap".parse::<ValueFormat>().unwrap(), ValueFormat::Int32BeSwap);
        assert_eq!(
            "double little-endian byte swap".parse::<ValueFormat>().unwrap(),
            ValueFormat::Float64LeSwap
        );
        assert_eq!(" Hex ".parse::<ValueFormat>().unwrap(), ValueFormat::Hex16);
        assert!("int24-be".parse::<ValueFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&ValueFormat::Uint64BeSwap).unwrap();
        assert_eq!(json, "\"uint64-be-swap\"");
        let format: ValueFormat = serde_json::from_str("\"float-le\"").unwrap();
        assert_eq!(format, ValueFormat::Float32Le);
    }
}
