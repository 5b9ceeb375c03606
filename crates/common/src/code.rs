//! Immutable code buffers.
//!
//! A [`Code`] is the contiguous byte buffer handed to the interpreter by the
//! component that loads a contract. It is never written to after
//! construction and is cheap to clone, so frames can hold their own handle.

use std::fmt;
use std::sync::Arc;

use crate::error::{DecodeError, HexError};
use crate::instruction::Instruction;

/// A contract's bytecode.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bytes: Arc<[u8]>,
}

impl Code {
    /// Create a code buffer from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            bytes: Arc::from(bytes),
        }
    }

    /// Parse a hex string into a code buffer.
    ///
    /// An optional `0x` prefix is accepted and all whitespace is ignored, so
    /// hex split over several lines parses as one buffer.
    pub fn from_hex(text: &str) -> Result<Self, HexError> {
        let digits: String = text.split_whitespace().collect();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(&digits);
        let bytes = hex::decode(digits).map_err(|e| HexError(e.to_string()))?;
        Ok(Self::new(bytes))
    }

    /// Lowercase hex encoding with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the code has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the instruction at `pc`. `None` at or past the end.
    pub fn instruction_at(&self, pc: usize) -> Option<Result<Instruction<'_>, DecodeError>> {
        Instruction::decode_at(&self.bytes, pc)
    }

    /// Linear sweep over every instruction in the buffer.
    ///
    /// Unsupported bytes are yielded as errors and skipped one byte at a
    /// time. A truncated PUSH is yielded as an error and ends the sweep.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            code: &self.bytes,
            pc: 0,
        }
    }
}

impl From<Vec<u8>> for Code {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Code {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Code {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self.to_hex())
    }
}

/// Iterator returned by [`Code::instructions`].
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    code: &'a [u8],
    pc: usize,
}

impl<'a> Iterator for Instructions<'a> {
    type Item = (usize, Result<Instruction<'a>, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        let pc = self.pc;
        let decoded = Instruction::decode_at(self.code, pc)?;
        self.pc = match &decoded {
            Ok(instr) => pc + instr.size(),
            Err(DecodeError::TruncatedImmediate { .. }) => self.code.len(),
            Err(_) => pc + 1,
        };
        Some((pc, decoded))
    }
}
