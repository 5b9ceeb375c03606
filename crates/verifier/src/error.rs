//! Verification errors for the evmcore verifier.
//!
//! Every error tied to an instruction carries its byte offset (`at`).
//! The verifier collects ALL errors, not just the first.

use evmcore_common::Opcode;
use thiserror::Error;

/// Errors found during static verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    // --- Limits ---
    /// Code exceeds the maximum contract size.
    #[error("code too large: {size} bytes (max {limit})")]
    CodeTooLarge { size: usize, limit: usize },

    // --- Path ---
    /// A byte on the execution path is not an implemented opcode.
    #[error("unsupported opcode {byte:#04x} at byte {at}")]
    UnsupportedOpcode { at: usize, byte: u8 },

    /// A PUSH on the execution path runs past the end of the code.
    #[error("truncated PUSH{width} at byte {at}: {available} of {width} immediate byte(s)")]
    TruncatedPush { at: usize, width: u8, available: usize },

    // --- Stack ---
    /// An opcode needs more operands than the stack can hold at that point.
    #[error("stack underflow at byte {at}: {opcode} needs {required}, height {height}")]
    StackUnderflow {
        at: usize,
        opcode: Opcode,
        required: usize,
        height: usize,
    },

    /// The stack would grow past its maximum height.
    #[error("stack overflow at byte {at}")]
    StackOverflow { at: usize },
}
