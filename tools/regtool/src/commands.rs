//! Command implementations
//!
//! Each command returns its stdout text; `main` only prints and colors it.

use anyhow::{Context, Result};
use tracing::debug;
use voltage_regcodec::{
    parse_value, render_row, render_value, RegisterBlock, RegisterCodec, RegisterWord,
    ValueFormat,
};

/// Parse one register word as decimal or `0x` hex
pub fn parse_word(s: &str) -> std::result::Result<RegisterWord, String> {
    let s = s.trim();
    let parsed = match s.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("0x") => u16::from_str_radix(&s[2..], 16),
        _ => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid register word {:?}: {}", s, e))
}

/// One line per format: code, key, words and label
pub fn list_formats() -> String {
    let mut out = format!("{:>4}  {:<16} {:>5}  {}\n", "CODE", "KEY", "WORDS", "LABEL");
    for format in ValueFormat::ALL {
        out.push_str(&format!(
            "{:>4}  {:<16} {:>5}  {}\n",
            format.code(),
            format.key(),
            format.word_count(),
            format.label()
        ));
    }
    out
}

pub fn decode(words: &[RegisterWord], offset: usize, format: ValueFormat) -> Result<String> {
    let value = RegisterCodec::decode(words, offset, format)
        .with_context(|| format!("Cannot decode {} at offset {}", format, offset))?;
    debug!("Decoded {:?} as {}", value, format);
    Ok(render_value(value, format.style()))
}

/// Encoded registers as space-separated `0x` words, ready to feed back to `decode`
pub fn encode(text: &str, format: ValueFormat) -> Result<String> {
    let value = parse_value(text, format).with_context(|| format!("Cannot parse {:?}", text))?;
    let words = RegisterCodec::encode(value, format)
        .with_context(|| format!("Cannot encode {} as {}", value, format))?;
    Ok(words
        .iter()
        .map(|w| format!("0x{:04x}", w))
        .collect::<Vec<_>>()
        .join(" "))
}

/// `address = value` rows for the register block
pub fn table(words: &[RegisterWord], start_address: u16, format: ValueFormat) -> Result<String> {
    let block = RegisterBlock::from_registers(start_address, words.to_vec())?;
    let rows = block.rows(format)?;
    let skipped = block.quantity() - rows.len() * format.word_count();
    if skipped > 0 {
        debug!("{} trailing register(s) do not fill a {} row", skipped, format);
    }
    Ok(rows
        .iter()
        .map(|row| render_row(row, format))
        .collect::<Vec<_>>()
        .join("\n"))
}
