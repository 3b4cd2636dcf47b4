//! VoltageEMS register codec
//!
//! Converts typed scalar values to and from windows of 16-bit Modbus
//! registers under the 28 supported formats.
//!
//! # Architecture
//!
//! ```text
//! ValueFormat ──spec()──> kind / width / byte order / display style
//!      │
//!      ▼
//! RegisterCodec::decode(&[u16], offset, format) ──> ScalarValue
//! RegisterCodec::encode(ScalarValue, format)     ──> RegisterWords
//!      │
//!      ▼
//! RegisterBlock (start address + quantity, edited row by row)
//! ```
//!
//! # Example
//!
//! ```rust
//! use voltage_regcodec::{RegisterCodec, ScalarValue, ValueFormat};
//!
//! let regs = [0x1234, 0x5678];
//! let value = RegisterCodec::decode(&regs, 0, ValueFormat::Int32BeSwap)?;
//! assert_eq!(value, ScalarValue::I32(0x5678_1234));
//!
//! let words = RegisterCodec::encode(value, ValueFormat::Int32BeSwap)?;
//! assert_eq!(words.as_slice(), &regs);
//! # Ok::<(), voltage_regcodec::CodecError>(())
//! ```

pub mod block;
pub mod byte_order;
pub mod codec;
pub mod error;
pub mod format;
pub mod input;
pub mod render;
pub mod value;

pub use block::{
    RegisterBlock, RegisterRow, WriteMultipleRegistersRequest, MAX_WRITE_REGISTERS,
    WRITE_MULTIPLE_REGISTERS,
};
pub use byte_order::ByteOrder;
pub use codec::{RegisterCodec, RegisterWord, RegisterWords};
pub use error::{CodecError, Result};
pub use format::{BitWidth, DisplayStyle, FormatSpec, ValueFormat, ValueKind};
pub use input::parse_value;
pub use render::{render_row, render_value};
pub use value::ScalarValue;
