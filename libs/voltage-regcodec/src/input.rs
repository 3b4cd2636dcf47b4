//! Text input for register values
//!
//! Parses what an operator types into a value cell: decimal for numeric
//! formats, radix 16 for hex cells and radix 2 for binary cells.

use std::num::{IntErrorKind, ParseIntError};

use crate::error::{CodecError, Result};
use crate::format::{DisplayStyle, ValueFormat, ValueKind};
use crate::value::ScalarValue;

/// Parse `text` into the native value of `format`
///
/// Surrounding whitespace is ignored. Hex accepts an optional `0x` prefix
/// and binary an optional `0b` prefix; both are limited to one register.
pub fn parse_value(text: &str, format: ValueFormat) -> Result<ScalarValue> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CodecError::invalid_input(text, format));
    }

    match format.style() {
        DisplayStyle::Hex => parse_radix(strip_prefix(trimmed, "0x"), 16, text, format),
        DisplayStyle::Binary => parse_radix(strip_prefix(trimmed, "0b"), 2, text, format),
        DisplayStyle::Decimal if format.kind() == ValueKind::Float => {
            let v: f64 = trimmed
                .parse()
                .map_err(|_| CodecError::invalid_input(text, format))?;
            ScalarValue::from_float(v, format)
        },
        DisplayStyle::Decimal => {
            let n: i128 = trimmed
                .parse()
                .map_err(|e| int_error(&e, text, format))?;
            ScalarValue::from_integer(n, format)
        },
    }
}

fn strip_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &s[prefix.len()..],
        _ => s,
    }
}

fn parse_radix(digits: &str, radix: u32, text: &str, format: ValueFormat) -> Result<ScalarValue> {
    if digits.starts_with(['+', '-']) {
        return Err(CodecError::invalid_input(text, format));
    }
    let n = u128::from_str_radix(digits, radix).map_err(|e| int_error(&e, text, format))?;
    ScalarValue::from_integer(n as i128, format).map_err(|_| CodecError::range(text.trim(), format))
}

fn int_error(e: &ParseIntError, text: &str, format: ValueFormat) -> CodecError {
    match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CodecError::range(text.trim(), format),
        _ => CodecError::invalid_input(text, format),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_integers() {
        assert_eq!(parse_value("-1", ValueFormat::Signed16).unwrap(), ScalarValue::I16(-1));
        assert_eq!(parse_value(" 65535 ", ValueFormat::Unsigned16).unwrap(), ScalarValue::U16(65535));
        assert_eq!(
            parse_value("+305419896", ValueFormat::Int32Le).unwrap(),
            ScalarValue::I32(305_419_896)
        );
        assert_eq!(
            parse_value("18446744073709551615", ValueFormat::Uint64BeSwap).unwrap(),
            ScalarValue::U64(u64::MAX)
        );
    }

    #[test]
    fn test_parse_decimal_out_of_range() {
        assert!(matches!(
            parse_value("32768", ValueFormat::Signed16),
            Err(CodecError::RangeViolation { .. })
        ));
        assert!(matches!(
            parse_value("-1", ValueFormat::Uint32Be),
            Err(CodecError::RangeViolation { .. })
        ));
        assert!(matches!(
            parse_value("999999999999999999999999999999999999999999", ValueFormat::Int64Be),
            Err(CodecError::RangeViolation { .. })
        ));
    }

    #[test]
    fn test_parse_hex_and_binary() {
        assert_eq!(parse_value("ff", ValueFormat::Hex16).unwrap(), ScalarValue::U16(0xFF));
        assert_eq!(parse_value("0xBEEF", ValueFormat::Hex16).unwrap(), ScalarValue::U16(0xBEEF));
        assert_eq!(parse_value("0X1", ValueFormat::Hex16).unwrap(), ScalarValue::U16(1));
        assert_eq!(parse_value("0b101", ValueFormat::Binary16).unwrap(), ScalarValue::U16(5));
        assert_eq!(
            parse_value("1111111111111111", ValueFormat::Binary16).unwrap(),
            ScalarValue::U16(0xFFFF)
        );

        assert!(matches!(
            parse_value("10000", ValueFormat::Hex16),
            Err(CodecError::RangeViolation { .. })
        ));
        assert!(matches!(
            parse_value("102", ValueFormat::Binary16),
            Err(CodecError::InvalidInput { .. })
        ));
        assert!(parse_value("-1", ValueFormat::Hex16).is_err());
        assert!(parse_value("0x", ValueFormat::Hex16).is_err());
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(parse_value("1.5", ValueFormat::Float32Be).unwrap(), ScalarValue::F32(1.5));
        assert_eq!(parse_value("-2e3", ValueFormat::Float64Le).unwrap(), ScalarValue::F64(-2000.0));
        assert_eq!(
            parse_value("inf", ValueFormat::Float32LeSwap).unwrap(),
            ScalarValue::F32(f32::INFINITY)
        );
        assert!(matches!(
            parse_value("1e39", ValueFormat::Float32Be),
            Err(CodecError::RangeViolation { .. })
        ));
    }

    #[test]
    fn test_parse_invalid() {
        for (text, format) in [
            ("", ValueFormat::Signed16),
            ("   ", ValueFormat::Float32Be),
            ("12a", ValueFormat::Int32Be),
            ("1.5", ValueFormat::Signed16),
            ("abc", ValueFormat::Float64Be),
            ("xyz", ValueFormat::Hex16),
        ] {
            let err = parse_value(text, format).unwrap_err();
            assert!(matches!(err, CodecError::InvalidInput { .. }), "{:?} {}", text, format);
        }
    }
}
