//! Decode errors for evmcore bytecode.

use thiserror::Error;

/// Errors that occur while decoding a code buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The byte does not map to any implemented opcode.
    #[error("unsupported opcode: {0:#04x}")]
    UnsupportedOpcode(u8),

    /// A PUSH immediate runs past the end of the code buffer.
    #[error("PUSH{width} at {at} needs {width} immediate byte(s), {available} available")]
    TruncatedImmediate { at: usize, width: u8, available: usize },
}

/// A hex code string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex code: {0}")]
pub struct HexError(pub String);
