//! Disassembler: bytecode → canonical assembly text.
//!
//! Output format is flat text, one instruction per line. No indentation,
//! no comments, no blank lines. PUSHn immediates are written as exactly n
//! bytes of zero-padded hex. Bytes that do not decode are written as `DATA`
//! lines so the text still reassembles to the same bytes.

use evmcore_common::{Code, DecodeError};

use crate::parser::DATA_DIRECTIVE;

/// Disassemble a code buffer into canonical assembly text.
///
/// The output is guaranteed to reassemble to identical bytes
/// (`assemble(disassemble(code)) == code`).
pub fn disassemble(code: &Code) -> String {
    let bytes = code.as_bytes();
    let mut out = String::new();

    for (pc, decoded) in code.instructions() {
        let line = match decoded {
            Ok(instr) if instr.immediate.is_empty() => instr.opcode.mnemonic().to_string(),
            Ok(instr) => format!(
                "{} 0x{}",
                instr.opcode.mnemonic(),
                hex::encode(instr.immediate)
            ),
            Err(DecodeError::UnsupportedOpcode(byte)) => {
                format!("{DATA_DIRECTIVE} 0x{byte:02x}")
            }
            // A truncated PUSH swallows the rest of the code.
            Err(DecodeError::TruncatedImmediate { .. }) => {
                format!("{DATA_DIRECTIVE} 0x{}", hex::encode(&bytes[pc..]))
            }
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dis(bytes: &[u8]) -> String {
        disassemble(&Code::new(bytes))
    }

    #[test]
    fn empty_code() {
        assert_eq!(dis(&[]), "");
    }

    #[test]
    fn add_program() {
        assert_eq!(
            dis(&[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]),
            "PUSH1 0x05\nPUSH1 0x03\nADD\nSTOP\n"
        );
    }

    #[test]
    fn push_keeps_leading_zeros() {
        assert_eq!(dis(&[0x62, 0x00, 0x00, 0x01]), "PUSH3 0x000001\n");
    }

    #[test]
    fn dup_swap_return() {
        assert_eq!(dis(&[0x80, 0x9F, 0xF3]), "DUP1\nSWAP16\nRETURN\n");
    }

    #[test]
    fn unsupported_byte_as_data() {
        assert_eq!(dis(&[0x01, 0xFE, 0x02]), "ADD\nDATA 0xfe\nMUL\n");
    }

    #[test]
    fn truncated_push_as_data() {
        assert_eq!(dis(&[0x50, 0x63, 0xAA, 0xBB]), "POP\nDATA 0x63aabb\n");
    }
}
