//! Text rendering of decoded values

use crate::block::RegisterRow;
use crate::format::{DisplayStyle, ValueFormat};
use crate::value::ScalarValue;

/// Render `value` in the given style
///
/// Hex is lower-case with 4 digits per register, binary has 16 digits per
/// register. Both show the raw bit pattern, so negative values appear in
/// two's complement.
pub fn render_value(value: ScalarValue, style: DisplayStyle) -> String {
    let words = value.width().word_count();
    match style {
        DisplayStyle::Decimal => value.to_string(),
        DisplayStyle::Hex => format!("{:0width$x}", value.to_bits(), width = words * 4),
        DisplayStyle::Binary => format!("{:0width$b}", value.to_bits(), width = words * 16),
    }
}

/// Render one table row as `"<address> = <value>"`
pub fn render_row(row: &RegisterRow, format: ValueFormat) -> String {
    format!("{} = {}", row.address, render_value(row.value, format.style()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_decimal() {
        assert_eq!(render_value(ScalarValue::I16(-1), DisplayStyle::Decimal), "-1");
        assert_eq!(render_value(ScalarValue::F32(1.0), DisplayStyle::Decimal), "1");
        assert_eq!(render_value(ScalarValue::U64(u64::MAX), DisplayStyle::Decimal), "18446744073709551615");
    }

    #[test]
    fn test_render_hex_padded() {
        assert_eq!(render_value(ScalarValue::U16(0xAB), DisplayStyle::Hex), "00ab");
        assert_eq!(render_value(ScalarValue::U16(0xBEEF), DisplayStyle::Hex), "beef");
        assert_eq!(render_value(ScalarValue::I32(-1), DisplayStyle::Hex), "ffffffff");
    }

    #[test]
    fn test_render_binary_padded() {
        assert_eq!(render_value(ScalarValue::U16(5), DisplayStyle::Binary), "0000000000000101");
        assert_eq!(render_value(ScalarValue::I16(-1), DisplayStyle::Binary), "1".repeat(16));
    }

    #[test]
    fn test_render_row() {
        let row = RegisterRow {
            address: 40,
            value: ScalarValue::U16(0x1F),
        };
        assert_eq!(render_row(&row, ValueFormat::Hex16), "40 = 001f");
        assert_eq!(render_row(&row, ValueFormat::Unsigned16), "40 = 31");
    }
}
