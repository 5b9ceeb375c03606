//! Error types for the evmcore assembler.

use thiserror::Error;

/// Errors produced during assembly of text to bytecode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode or directive did not have its argument.
    #[error("line {line}: {opcode} expects {expected} argument(s)")]
    MissingArgument {
        line: usize,
        opcode: &'static str,
        expected: usize,
    },

    /// A numeric literal could not be parsed, or is the wrong kind for its
    /// position.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A PUSH immediate has more significant bytes than the opcode's width.
    #[error("line {line}: '{token}' does not fit in PUSH{width}")]
    ImmediateTooWide {
        line: usize,
        width: u8,
        token: String,
    },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },
}

impl AsmError {
    /// The 1-based source line of the error.
    pub fn line(&self) -> usize {
        match *self {
            AsmError::UnknownOpcode { line, .. }
            | AsmError::MissingArgument { line, .. }
            | AsmError::InvalidNumber { line, .. }
            | AsmError::ImmediateTooWide { line, .. }
            | AsmError::UnexpectedToken { line, .. } => line,
        }
    }
}
