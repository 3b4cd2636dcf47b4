//! Byte/word order modes for multi-register values
//!
//! Uses ABCD notation where A is the most significant byte. For the 32-bit
//! value `0x12345678` stored in two registers:
//!
//! | Mode | Registers | Bytes on the wire |
//! |------|-----------|-------------------|
//! | `BigEndian` (ABCD) | `[0x1234, 0x5678]` | `12 34 56 78` |
//! | `LittleEndian` (DCBA) | `[0x7856, 0x3412]` | `78 56 34 12` |
//! | `BigEndianSwap` (CDAB) | `[0x5678, 0x1234]` | `56 78 12 34` |
//! | `LittleEndianSwap` (BADC) | `[0x3412, 0x7856]` | `34 12 78 56` |
//!
//! The swapped modes are the unswapped ones applied to the register window
//! in reverse word order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Byte/word order of a value spread over consecutive registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// ABCD: words in register order, high byte first
    #[default]
    BigEndian,

    /// DCBA: least significant byte in the first register
    LittleEndian,

    /// CDAB: big-endian with the word order reversed (Modbus common)
    BigEndianSwap,

    /// BADC: little-endian with the word order reversed
    LittleEndianSwap,
}

impl ByteOrder {
    pub const ALL: [ByteOrder; 4] = [
        ByteOrder::BigEndian,
        ByteOrder::LittleEndian,
        ByteOrder::BigEndianSwap,
        ByteOrder::LittleEndianSwap,
    ];

    /// Parse common textual spellings
    ///
    /// - "ABCD", "BE", "BIG_ENDIAN" → BigEndian
    /// - "DCBA", "LE", "LITTLE_ENDIAN" → LittleEndian
    /// - "CDAB", "BIG_ENDIAN_SWAP" → BigEndianSwap
    /// - "BADC", "LITTLE_ENDIAN_SWAP" → LittleEndianSwap
    ///
    /// Hyphens, underscores and case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "ABCD" | "BE" | "BIGENDIAN" | "ABCDEFGH" => Some(Self::BigEndian),
            "DCBA" | "LE" | "LITTLEENDIAN" | "HGFEDCBA" => Some(Self::LittleEndian),
            "CDAB" | "BESWAP" | "BIGENDIANSWAP" | "GHEFCDAB" => Some(Self::BigEndianSwap),
            "BADC" | "LESWAP" | "LITTLEENDIANSWAP" | "BADCFEHG" => Some(Self::LittleEndianSwap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BigEndian => "ABCD (Big-Endian)",
            Self::LittleEndian => "DCBA (Little-Endian)",
            Self::BigEndianSwap => "CDAB (Big-Endian Swap)",
            Self::LittleEndianSwap => "BADC (Little-Endian Swap)",
        }
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, Self::LittleEndian | Self::LittleEndianSwap)
    }

    /// Check if words are reversed relative to the plain mode
    pub fn has_word_swap(&self) -> bool {
        matches!(self, Self::BigEndianSwap | Self::LittleEndianSwap)
    }

    /// The same endianness without word reversal
    pub fn unswapped(&self) -> Self {
        match self {
            Self::BigEndian | Self::BigEndianSwap => Self::BigEndian,
            Self::LittleEndian | Self::LittleEndianSwap => Self::LittleEndian,
        }
    }

    /// The same endianness with word reversal
    pub fn swapped(&self) -> Self {
        match self {
            Self::BigEndian | Self::BigEndianSwap => Self::BigEndianSwap,
            Self::LittleEndian | Self::LittleEndianSwap => Self::LittleEndianSwap,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ByteOrder {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CodecError::unsupported(format!("byte order {:?}", s)))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(ByteOrder::parse("ABCD"), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::parse("ab-cd"), Some(ByteOrder::BigEndian));
        assert_eq!(ByteOrder::parse("be"), Some(ByteOrder::BigEndian));

        assert_eq!(ByteOrder::parse("DCBA"), Some(ByteOrder::LittleEndian));
        assert_eq!(ByteOrder::parse("little_endian"), Some(ByteOrder::LittleEndian));

        assert_eq!(ByteOrder::parse("CDAB"), Some(ByteOrder::BigEndianSwap));
        assert_eq!(ByteOrder::parse("BADC"), Some(ByteOrder::LittleEndianSwap));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(ByteOrder::parse("invalid"), None);
        assert_eq!(ByteOrder::parse(""), None);
        assert!(matches!(
            "AB".parse::<ByteOrder>(),
            Err(CodecError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_swap_relationships() {
        for order in ByteOrder::ALL {
            assert!(!order.unswapped().has_word_swap());
            assert!(order.swapped().has_word_swap());
            assert_eq!(order.unswapped().is_little_endian(), order.is_little_endian());
        }
        assert_eq!(ByteOrder::BigEndianSwap.unswapped(), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::LittleEndian.swapped(), ByteOrder::LittleEndianSwap);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&ByteOrder::LittleEndianSwap).unwrap();
        assert_eq!(json, "\"little-endian-swap\"");
        let back: ByteOrder = serde_json::from_str("\"big-endian-swap\"").unwrap();
        assert_eq!(back, ByteOrder::BigEndianSwap);
    }

    #[test]
    fn test_default() {
        assert_eq!(ByteOrder::default(), ByteOrder::BigEndian);
    }
}
