//! Register block edited row by row
//!
//! Backs a "write multiple registers" editor: a start address, a register
//! quantity, and the register values viewed as rows of one [`ValueFormat`].
//! Row `n` covers `word_count` registers starting at `start_address + n * word_count`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{RegisterCodec, RegisterWord};
use crate::error::{CodecError, Result};
use crate::format::ValueFormat;
use crate::input::parse_value;
use crate::value::ScalarValue;

/// Function code 0x10
pub const WRITE_MULTIPLE_REGISTERS: u8 = 0x10;

/// Upper bound on the register quantity of one block
pub const MAX_WRITE_REGISTERS: usize = 2000;

/// One decoded row of a block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegisterRow {
    /// Register address of the row's first word
    pub address: u32,
    pub value: ScalarValue,
}

/// Write multiple registers request data (function code 0x10)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteMultipleRegistersRequest {
    pub slave_id: u8,
    pub function_code: u8,
    pub start_address: u16,
    pub quantity: u16,
    pub values: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterBlock {
    start_address: u16,
    registers: Vec<RegisterWord>,
}

impl RegisterBlock {
    /// Create a zeroed block of `quantity` registers
    pub fn new(start_address: u16, quantity: usize) -> Result<Self> {
        check_capacity(quantity)?;
        Ok(Self {
            start_address,
            registers: vec![0; quantity],
        })
    }

    /// Create a block holding existing register values
    pub fn from_registers(start_address: u16, registers: Vec<RegisterWord>) -> Result<Self> {
        check_capacity(registers.len())?;
        Ok(Self {
            start_address,
            registers,
        })
    }

    pub fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn set_start_address(&mut self, start_address: u16) {
        self.start_address = start_address;
    }

    pub fn quantity(&self) -> usize {
        self.registers.len()
    }

    /// Resize the block; all registers are reset to zero
    pub fn set_quantity(&mut self, quantity: usize) -> Result<()> {
        check_capacity(quantity)?;
        debug!("Register quantity {} -> {}, values cleared", self.registers.len(), quantity);
        self.registers = vec![0; quantity];
        Ok(())
    }

    pub fn registers(&self) -> &[RegisterWord] {
        &self.registers
    }

    /// Number of whole `format` values that fit in the block
    pub fn row_count(&self, format: ValueFormat) -> usize {
        self.quantity() / format.word_count()
    }

    /// Decode every row; trailing registers that do not fill a row are skipped
    pub fn rows(&self, format: ValueFormat) -> Result<Vec<RegisterRow>> {
        self.check_fits(format)?;
        (0..self.row_count(format))
            .map(|row| {
                Ok(RegisterRow {
                    address: self.row_address(row, format),
                    value: self.value_at(row, format)?,
                })
            })
            .collect()
    }

    pub fn value_at(&self, row: usize, format: ValueFormat) -> Result<ScalarValue> {
        let offset = self.row_offset(row, format)?;
        RegisterCodec::decode(&self.registers, offset, format)
    }

    /// Encode `value` into `row`; the block is unchanged on error
    pub fn set_value(&mut self, row: usize, format: ValueFormat, value: ScalarValue) -> Result<()> {
        let offset = self.row_offset(row, format)?;
        RegisterCodec::encode_into(value, format, &mut self.registers, offset)?;
        debug!(
            "Row {} (address {}) set to {} as {}: {:04X?}",
            row,
            self.row_address(row, format),
            value,
            format,
            &self.registers[offset..offset + format.word_count()]
        );
        Ok(())
    }

    /// Parse `text` for `format` and store it in `row`
    pub fn set_text(&mut self, row: usize, format: ValueFormat, text: &str) -> Result<()> {
        self.row_offset(row, format)?;
        let value = parse_value(text, format).inspect_err(|e| {
            debug!("Rejected input for row {}: {}", row, e);
        })?;
        self.set_value(row, format, value)
    }

    /// Snapshot of the block as a 0x10 request
    pub fn to_write_request(&self, slave_id: u8) -> WriteMultipleRegistersRequest {
        WriteMultipleRegistersRequest {
            slave_id,
            function_code: WRITE_MULTIPLE_REGISTERS,
            start_address: self.start_address,
            quantity: self.registers.len() as u16,
            values: self.registers.clone(),
        }
    }

    fn row_address(&self, row: usize, format: ValueFormat) -> u32 {
        u32::from(self.start_address) + (row * format.word_count()) as u32
    }

    fn row_offset(&self, row: usize, format: ValueFormat) -> Result<usize> {
        self.check_fits(format)?;
        let rows = self.row_count(format);
        if row >= rows {
            return Err(CodecError::RowOutOfRange { row, rows });
        }
        Ok(row * format.word_count())
    }

    fn check_fits(&self, format: ValueFormat) -> Result<()> {
        if self.quantity() < format.word_count() {
            return Err(CodecError::InsufficientRegisters {
                quantity: self.quantity(),
                word_count: format.word_count(),
                format,
            });
        }
        Ok(())
    }
}

fn check_capacity(quantity: usize) -> Result<()> {
    if quantity > MAX_WRITE_REGISTERS {
        return Err(CodecError::CapacityExceeded {
            requested: quantity,
            capacity: MAX_WRITE_REGISTERS,
        });
    }
    Ok(())
}
