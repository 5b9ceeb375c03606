//! Decoded instructions.
//!
//! An instruction is one opcode byte followed by zero or more immediate
//! bytes. Only PUSHn carries an immediate (n bytes, big-endian):
//! ```text
//! 0x60 0x05            PUSH1 0x05
//! 0x61 0x01 0x00       PUSH2 0x0100
//! 0x01                 ADD
//! ```

use crate::error::DecodeError;
use crate::opcode::Opcode;
use crate::word::Word;

/// A single decoded instruction borrowing its immediate from the code buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Immediate bytes, big-endian. Empty for everything except PUSHn.
    pub immediate: &'a [u8],
}

impl<'a> Instruction<'a> {
    /// Decode the instruction starting at `pc`.
    ///
    /// Returns `None` when `pc` is at or past the end of `code`.
    pub fn decode_at(code: &'a [u8], pc: usize) -> Option<Result<Self, DecodeError>> {
        let &byte = code.get(pc)?;
        let opcode = match Opcode::try_from(byte) {
            Ok(op) => op,
            Err(e) => return Some(Err(e)),
        };

        let width = opcode.immediate_len();
        let start = pc + 1;
        let available = code.len() - start;
        if available < width {
            return Some(Err(DecodeError::TruncatedImmediate {
                at: pc,
                width: width as u8,
                available,
            }));
        }

        Some(Ok(Self {
            opcode,
            immediate: &code[start..start + width],
        }))
    }

    /// Encoded size in bytes (opcode plus immediate).
    pub fn size(&self) -> usize {
        1 + self.immediate.len()
    }

    /// The word a PUSH instruction pushes. `None` for other opcodes.
    pub fn push_value(&self) -> Option<Word> {
        match self.opcode {
            Opcode::Push(_) => Word::from_be_slice(self.immediate),
            _ => None,
        }
    }

    /// Append the encoded bytes of this instruction to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode.byte());
        out.extend_from_slice(self.immediate);
    }
}
