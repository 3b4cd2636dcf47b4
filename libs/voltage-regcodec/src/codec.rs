//! Register codec
//!
//! Converts between a window of 16-bit registers and a [`ScalarValue`] for a
//! given [`ValueFormat`]. Big-endian and little-endian layouts are assembled
//! directly; the word-swapped layouts reverse the window's word order and
//! delegate to the plain layout of the same endianness.
//!
//! All assembly works on explicit byte arrays, so results never depend on
//! the host's byte order.

use std::ops::Deref;

use tracing::{debug, trace};

use crate::byte_order::ByteOrder;
use crate::error::{CodecError, Result};
use crate::format::{BitWidth, ValueFormat, ValueKind};
use crate::value::ScalarValue;

/// One Modbus register
pub type RegisterWord = u16;

/// Widest format covers four registers
pub const MAX_WORDS: usize = 4;

const MAX_BYTES: usize = MAX_WORDS * 2;

/// Registers produced by [`RegisterCodec::encode`]
///
/// Fixed capacity, holds exactly `word_count(format)` words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterWords {
    words: [RegisterWord; MAX_WORDS],
    len: usize,
}

impl RegisterWords {
    pub fn as_slice(&self) -> &[RegisterWord] {
        &self.words[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for RegisterWords {
    type Target = [RegisterWord];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[RegisterWord]> for RegisterWords {
    fn as_ref(&self) -> &[RegisterWord] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a RegisterWords {
    type Item = &'a RegisterWord;
    type IntoIter = std::slice::Iter<'a, RegisterWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Stateless register/value codec
pub struct RegisterCodec;

impl RegisterCodec {
    /// Number of consecutive registers `format` reads or writes
    pub fn word_count(format: ValueFormat) -> usize {
        format.word_count()
    }

    /// Decode the value stored at `buffer[offset..offset + word_count]`
    pub fn decode(buffer: &[RegisterWord], offset: usize, format: ValueFormat) -> Result<ScalarValue> {
        let words = window(buffer, offset, format.word_count())?;
        let image = assemble(words, format.byte_order());
        Ok(interpret(&image, format))
    }

    /// Encode `value` into exactly `word_count(format)` registers
    ///
    /// The value is first converted into the format's native type; values
    /// outside its range fail with [`CodecError::RangeViolation`].
    pub fn encode(value: ScalarValue, format: ValueFormat) -> Result<RegisterWords> {
        let native = value.coerce(format).inspect_err(|e| {
            debug!("Encode rejected for {}: {}", format, e);
        })?;
        let image = image_of(native);
        Ok(disassemble(&image, format.width(), format.byte_order()))
    }

    /// Encode `value` into `buffer` starting at `offset`
    ///
    /// Bounds and range are both checked before the buffer is written.
    pub fn encode_into(
        value: ScalarValue,
        format: ValueFormat,
        buffer: &mut [RegisterWord],
        offset: usize,
    ) -> Result<()> {
        let len = buffer.len();
        let word_count = format.word_count();
        let end = window_end(offset, word_count, len)?;
        let words = Self::encode(value, format)?;
        trace!("Writing {} at offset {}: {:04X?}", format, offset, words.as_slice());
        buffer
            .get_mut(offset..end)
            .ok_or(CodecError::BoundsViolation {
                offset,
                word_count,
                len,
            })?
            .copy_from_slice(&words);
        Ok(())
    }
}

fn window_end(offset: usize, word_count: usize, len: usize) -> Result<usize> {
    offset
        .checked_add(word_count)
        .filter(|end| *end <= len)
        .ok_or(CodecError::BoundsViolation {
            offset,
            word_count,
            len,
        })
}

fn window(buffer: &[RegisterWord], offset: usize, word_count: usize) -> Result<&[RegisterWord]> {
    let end = window_end(offset, word_count, buffer.len())?;
    buffer.get(offset..end).ok_or(CodecError::BoundsViolation {
        offset,
        word_count,
        len: buffer.len(),
    })
}

/// Most-significant-byte-first image of the value carried by `words`
///
/// Only the first `2 * words.len()` bytes are meaningful.
fn assemble(words: &[RegisterWord], order: ByteOrder) -> [u8; MAX_BYTES] {
    let n = words.len().min(MAX_WORDS);
    if order.has_word_swap() {
        let mut reversed = [0u16; MAX_WORDS];
        reversed[..n].copy_from_slice(&words[..n]);
        reversed[..n].reverse();
        return assemble(&reversed[..n], order.unswapped());
    }

    let mut image = [0u8; MAX_BYTES];
    for (chunk, word) in image.chunks_exact_mut(2).zip(&words[..n]) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    if order.is_little_endian() {
        image[..2 * n].reverse();
    }
    image
}

/// Inverse of [`assemble`]
fn disassemble(image: &[u8; MAX_BYTES], width: BitWidth, order: ByteOrder) -> RegisterWords {
    let n = width.word_count();
    let mut bytes = *image;
    if order.is_little_endian() {
        bytes[..2 * n].reverse();
    }

    let mut words = [0u16; MAX_WORDS];
    for (word, chunk) in words[..n].iter_mut().zip(bytes.chunks_exact(2)) {
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    if order.has_word_swap() {
        words[..n].reverse();
    }
    RegisterWords { words, len: n }
}

fn interpret(image: &[u8; MAX_BYTES], format: ValueFormat) -> ScalarValue {
    let [a, b, c, d, ..] = *image;
    match (format.kind(), format.width()) {
        (ValueKind::Signed, BitWidth::W16) => ScalarValue::I16(i16::from_be_bytes([a, b])),
        (ValueKind::Unsigned, BitWidth::W16) => ScalarValue::U16(u16::from_be_bytes([a, b])),
        (ValueKind::Signed, BitWidth::W32) => ScalarValue::I32(i32::from_be_bytes([a, b, c, d])),
        (ValueKind::Unsigned, BitWidth::W32) => ScalarValue::U32(u32::from_be_bytes([a, b, c, d])),
        (ValueKind::Float, BitWidth::W32) => ScalarValue::F32(f32::from_be_bytes([a, b, c, d])),
        (ValueKind::Signed, BitWidth::W64) => ScalarValue::I64(i64::from_be_bytes(*image)),
        (ValueKind::Unsigned, BitWidth::W64) => ScalarValue::U64(u64::from_be_bytes(*image)),
        (ValueKind::Float, BitWidth::W64) => ScalarValue::F64(f64::from_be_bytes(*image)),
        (ValueKind::Float, BitWidth::W16) => {
            unreachable!("{} claims a 16-bit float layout", format.label())
        },
    }
}

fn image_of(value: ScalarValue) -> [u8; MAX_BYTES] {
    let mut image = [0u8; MAX_BYTES];
    match value {
        ScalarValue::I16(v) => image[..2].copy_from_slice(&v.to_be_bytes()),
        ScalarValue::U16(v) => image[..2].copy_from_slice(&v.to_be_bytes()),
        ScalarValue::I32(v) => image[..4].copy_from_slice(&v.to_be_bytes()),
        ScalarValue::U32(v) => image[..4].copy_from_slice(&v.to_be_bytes()),
        ScalarValue::F32(v) => image[..4].copy_from_slice(&v.to_be_bytes()),
        ScalarValue::I64(v) => image.copy_from_slice(&v.to_be_bytes()),
        ScalarValue::U64(v) => image.copy_from_slice(&v.to_be_bytes()),
        ScalarValue::F64(v) => image.copy_from_slice(&v.to_be_bytes()),
    }
    image
}
