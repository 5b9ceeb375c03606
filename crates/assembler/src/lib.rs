//! evmcore assembler: bidirectional text ↔ bytecode translation.
//!
//! The assembler is a mechanical 1:1 translation. No labels, no macros.
//!
//! # Usage
//!
//! ```
//! use evmcore_assembler::{assemble, disassemble};
//!
//! let text = "PUSH1 0x05\nPUSH1 0x03\nADD\nSTOP\n";
//! let code = assemble(text).unwrap();
//! assert_eq!(code.as_bytes(), &[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);
//! assert_eq!(disassemble(&code), text);
//! ```
//!
//! # Syntax
//!
//! One instruction per line; `;` starts a comment; mnemonics are
//! case-insensitive. `PUSHn` takes one decimal or `0x` hex argument that
//! must fit in n bytes. `DATA 0x…` emits raw bytes.
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(code)) == code` holds for every byte string.
//! The disassembler outputs canonical text; the assembler accepts both
//! canonical and non-canonical input (e.g., decimal where hex is canonical).

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use evmcore_common::Code;
use lexer::tokenize_line;
use parser::parse_line;

/// Assemble text into bytecode.
///
/// Returns the first error encountered. Fix one error at a time.
pub fn assemble(text: &str) -> Result<Code, AsmError> {
    let mut bytes = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(result) = parse_line(&tokens, line_num)? {
            result.encode_into(&mut bytes);
        }
    }

    Ok(Code::new(bytes))
}

/// Disassemble bytecode into canonical assembly text.
pub fn disassemble(code: &Code) -> String {
    disassembler::disassemble(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assemble_minimal() {
        let code = assemble("STOP\n").unwrap();
        assert_eq!(code.as_bytes(), &[0x00]);
    }

    #[test]
    fn assemble_empty_text() {
        assert!(assemble("").unwrap().is_empty());
        assert!(assemble("; nothing\n\n").unwrap().is_empty());
    }

    #[test]
    fn roundtrip_assemble_then_disassemble_then_assemble() {
        let text = "push1 5\npush1 3\nadd\n";
        let first = assemble(text).unwrap();
        let canonical = disassemble(&first);
        assert_eq!(canonical, "PUSH1 0x05\nPUSH1 0x03\nADD\n");
        let second = assemble(&canonical).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn assemble_with_comments_and_blanks() {
        let text = "\
; store 8 and return it
PUSH1 5      ; a
PUSH1 3      ; b

ADD
PUSH1 0
MSTORE
PUSH1 0x20
PUSH1 0
RETURN
";
        let code = assemble(text).unwrap();
        assert_eq!(code.to_hex(), "0x600560030160005260206000f3");
    }

    #[test]
    fn assemble_decimal_and_hex_produce_same_result() {
        let hex = assemble("PUSH2 0x0100\n").unwrap();
        let dec = assemble("PUSH2 256\n").unwrap();
        assert_eq!(hex, dec);
    }

    #[test]
    fn assemble_data_directive() {
        let code = assemble("STOP\nDATA 0xdeadbeef\n").unwrap();
        assert_eq!(code.as_bytes(), &[0x00, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn error_unknown_opcode() {
        let err = assemble("FOOBAR\n").unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode { line: 1, .. }));
    }

    #[test]
    fn error_missing_argument() {
        let err = assemble("PUSH1\n").unwrap_err();
        assert!(matches!(err, AsmError::MissingArgument { line: 1, .. }));
    }

    #[test]
    fn error_invalid_number() {
        let err = assemble("PUSH2 0xZZZZ\n").unwrap_err();
        assert!(matches!(err, AsmError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn error_immediate_too_wide() {
        let err = assemble("PUSH1 0x0100\n").unwrap_err();
        assert!(matches!(
            err,
            AsmError::ImmediateTooWide {
                line: 1,
                width: 1,
                ..
            }
        ));
    }

    #[test]
    fn error_reports_correct_line() {
        let text = "STOP\nFOOBAR\n";
        let err = assemble(text).unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode { line: 2, .. }));
    }

    #[test]
    fn all_no_arg_opcodes_roundtrip() {
        let mut mnemonics = vec!["STOP", "ADD", "MUL", "SUB", "POP", "MSTORE", "RETURN"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        for n in 1..=16 {
            mnemonics.push(format!("DUP{n}"));
            mnemonics.push(format!("SWAP{n}"));
        }
        for mnemonic in &mnemonics {
            let text = format!("{mnemonic}\n");
            let code = assemble(&text).unwrap();
            assert_eq!(code.len(), 1, "{mnemonic} is one byte");
            assert_eq!(disassemble(&code), text, "roundtrip failed for {mnemonic}");
        }
    }

    #[test]
    fn all_push_widths_roundtrip() {
        for n in 1..=32usize {
            let text = format!("PUSH{n} 0x{}\n", "ab".repeat(n));
            let code = assemble(&text).unwrap();
            assert_eq!(code.len(), n + 1);
            assert_eq!(disassemble(&code), text, "roundtrip failed for PUSH{n}");
        }
    }
}
