//! Faults raised by the interpreter.
//!
//! Every fault carries the program counter of the faulting opcode (`at`).
//! A fault is never recovered inside the interpreter: it aborts the whole
//! frame chain and is returned to whoever started the loop.

use evmcore_common::{DecodeError, Opcode};
use thiserror::Error;

use crate::memory::MemoryError;
use crate::stack::StackError;

/// Errors that abort execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// An opcode needed more stack operands than were present.
    #[error("{opcode} needs {required} stack operand(s), found {height} at pc {at}")]
    UnexpectedNumArgs {
        at: usize,
        opcode: Opcode,
        required: usize,
        height: usize,
    },

    /// A PUSH immediate would read past the end of the code buffer.
    #[error("PUSH{width} reads past end of code ({available} byte(s) left) at pc {at}")]
    UnexpectedEnd { at: usize, width: u8, available: usize },

    /// The fetched byte is not an implemented opcode.
    #[error("unsupported opcode {byte:#04x} at pc {at}")]
    UnsupportedOpcode { at: usize, byte: u8 },

    /// Push onto a stack already holding 1024 words.
    #[error("stack overflow at pc {at}")]
    StackOverflow { at: usize },

    /// Memory growth past the configured limit, or an offset + size that
    /// does not fit in 64 bits.
    #[error("memory expansion to {requested} bytes exceeds limit {limit} at pc {at}")]
    MemoryLimitExceeded {
        at: usize,
        requested: u128,
        limit: usize,
    },
}

impl Fault {
    /// The program counter of the faulting opcode.
    pub fn at(&self) -> usize {
        match *self {
            Fault::UnexpectedNumArgs { at, .. }
            | Fault::UnexpectedEnd { at, .. }
            | Fault::UnsupportedOpcode { at, .. }
            | Fault::StackOverflow { at }
            | Fault::MemoryLimitExceeded { at, .. } => at,
        }
    }

    pub(crate) fn decode(at: usize, err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedOpcode(byte) => Fault::UnsupportedOpcode { at, byte },
            DecodeError::TruncatedImmediate {
                width, available, ..
            } => Fault::UnexpectedEnd {
                at,
                width,
                available,
            },
        }
    }

    pub(crate) fn stack(at: usize, opcode: Opcode, err: StackError) -> Self {
        match err {
            StackError::Underflow { required, height } => Fault::UnexpectedNumArgs {
                at,
                opcode,
                required,
                height,
            },
            StackError::Overflow { .. } => Fault::StackOverflow { at },
        }
    }

    pub(crate) fn memory(at: usize, err: MemoryError) -> Self {
        Fault::MemoryLimitExceeded {
            at,
            requested: err.requested,
            limit: err.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            Fault::UnexpectedNumArgs {
                at: 0,
                opcode: Opcode::Add,
                required: 2,
                height: 0
            }
            .to_string(),
            "ADD needs 2 stack operand(s), found 0 at pc 0"
        );
        assert_eq!(
            Fault::UnexpectedEnd {
                at: 4,
                width: 32,
                available: 10
            }
            .to_string(),
            "PUSH32 reads past end of code (10 byte(s) left) at pc 4"
        );
        assert_eq!(
            Fault::UnsupportedOpcode { at: 7, byte: 0xFE }.to_string(),
            "unsupported opcode 0xfe at pc 7"
        );
        assert_eq!(
            Fault::StackOverflow { at: 1024 }.to_string(),
            "stack overflow at pc 1024"
        );
    }

    #[test]
    fn at_reports_pc() {
        assert_eq!(Fault::StackOverflow { at: 9 }.at(), 9);
        assert_eq!(
            Fault::MemoryLimitExceeded {
                at: 3,
                requested: 1 << 70,
                limit: 1024
            }
            .at(),
            3
        );
    }

    #[test]
    fn decode_errors_map_to_faults() {
        assert_eq!(
            Fault::decode(5, DecodeError::UnsupportedOpcode(0x04)),
            Fault::UnsupportedOpcode { at: 5, byte: 0x04 }
        );
        assert_eq!(
            Fault::decode(
                5,
                DecodeError::TruncatedImmediate {
                    at: 5,
                    width: 2,
                    available: 1
                }
            ),
            Fault::UnexpectedEnd {
                at: 5,
                width: 2,
                available: 1
            }
        );
    }
}
