//! Parser for evmcore assembly tokens into bytecode.
//!
//! A line is either an opcode mnemonic (with a single immediate for PUSHn)
//! or the `DATA` directive, which emits raw bytes.

use crate::error::AsmError;
use crate::lexer::Token;
use evmcore_common::opcode::ALL_OPCODES;
use evmcore_common::Opcode;

/// Directive emitting its hex argument verbatim.
pub(crate) const DATA_DIRECTIVE: &str = "DATA";

/// Result of parsing a single assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseResult {
    /// An opcode with its immediate (empty unless PUSHn, exactly n bytes).
    Op { opcode: Opcode, immediate: Vec<u8> },
    /// Raw bytes from a DATA line.
    Data(Vec<u8>),
}

impl ParseResult {
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            ParseResult::Op { opcode, immediate } => {
                out.push(opcode.byte());
                out.extend_from_slice(immediate);
            }
            ParseResult::Data(bytes) => out.extend_from_slice(bytes),
        }
    }
}

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

/// Parse a sequence of tokens from a single line.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(
    tokens: &[Token],
    line_num: usize,
) -> Result<Option<ParseResult>, AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let mnemonic = match first {
        Token::Ident(s) => s.as_str(),
        other => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: other.describe(),
            })
        }
    };
    let args = &tokens[1..];

    if mnemonic == DATA_DIRECTIVE {
        let bytes = expect_hex(args, 0, line_num, DATA_DIRECTIVE, 1)?;
        expect_end(&args[1..], line_num)?;
        return Ok(Some(ParseResult::Data(bytes)));
    }

    let opcode = lookup_opcode(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line: line_num,
        token: mnemonic.to_string(),
    })?;

    match opcode {
        Opcode::Push(width) => {
            let immediate = expect_immediate(args, line_num, opcode.mnemonic(), width)?;
            expect_end(&args[1..], line_num)?;
            Ok(Some(ParseResult::Op { opcode, immediate }))
        }

        // Everything else takes no arguments.
        _ => {
            expect_end(args, line_num)?;
            Ok(Some(ParseResult::Op {
                opcode,
                immediate: Vec::new(),
            }))
        }
    }
}

/// Extract a PUSH immediate, left-padded to exactly `width` bytes.
///
/// Decimal and hex are both accepted. Leading zero bytes do not count
/// against the width.
fn expect_immediate(
    args: &[Token],
    line: usize,
    opcode: &'static str,
    width: u8,
) -> Result<Vec<u8>, AsmError> {
    let token = args.first().ok_or(AsmError::MissingArgument {
        line,
        opcode,
        expected: 1,
    })?;

    let be_bytes = match token {
        Token::Number(n) => n.to_be_bytes().to_vec(),
        Token::Hex(bytes) => bytes.clone(),
        Token::Ident(s) => {
            return Err(AsmError::UnexpectedToken {
                line,
                token: s.clone(),
            })
        }
    };

    let significant = match be_bytes.iter().position(|&b| b != 0) {
        Some(first) => &be_bytes[first..],
        None => &[],
    };
    let width = width as usize;
    if significant.len() > width {
        return Err(AsmError::ImmediateTooWide {
            line,
            width: width as u8,
            token: token.describe(),
        });
    }

    let mut immediate = vec![0u8; width - significant.len()];
    immediate.extend_from_slice(significant);
    Ok(immediate)
}

/// Extract hex bytes from the token at position `idx`.
fn expect_hex(
    args: &[Token],
    idx: usize,
    line: usize,
    opcode: &'static str,
    expected: usize,
) -> Result<Vec<u8>, AsmError> {
    match args.get(idx) {
        Some(Token::Hex(bytes)) => Ok(bytes.clone()),
        Some(Token::Number(n)) => Err(AsmError::InvalidNumber {
            line,
            token: n.to_string(),
        }),
        Some(Token::Ident(s)) => Err(AsmError::UnexpectedToken {
            line,
            token: s.clone(),
        }),
        None => Err(AsmError::MissingArgument {
            line,
            opcode,
            expected,
        }),
    }
}

/// Check that there are no extra tokens.
fn expect_end(remaining: &[Token], line: usize) -> Result<(), AsmError> {
    if let Some(tok) = remaining.first() {
        return Err(AsmError::UnexpectedToken {
            line,
            token: tok.describe(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_string())
    }

    fn num(n: u64) -> Token {
        Token::Number(n)
    }

    fn hex(bytes: &[u8]) -> Token {
        Token::Hex(bytes.to_vec())
    }

    fn op(opcode: Opcode, immediate: &[u8]) -> Option<ParseResult> {
        Some(ParseResult::Op {
            opcode,
            immediate: immediate.to_vec(),
        })
    }

    #[test]
    fn parse_empty_tokens() {
        assert!(parse_line(&[], 1).unwrap().is_none());
    }

    #[test]
    fn parse_no_arg_opcodes() {
        assert_eq!(parse_line(&[ident("ADD")], 1), Ok(op(Opcode::Add, &[])));
        assert_eq!(
            parse_line(&[ident("SWAP16")], 1),
            Ok(op(Opcode::Swap(16), &[]))
        );
        assert_eq!(
            parse_line(&[ident("RETURN")], 1),
            Ok(op(Opcode::Return, &[]))
        );
    }

    #[test]
    fn parse_rejects_extra_args() {
        let err = parse_line(&[ident("ADD"), num(5)], 1).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnexpectedToken {
                line: 1,
                token: "5".to_string()
            }
        );
    }

    #[test]
    fn parse_push_decimal_padded() {
        assert_eq!(
            parse_line(&[ident("PUSH2"), num(5)], 1),
            Ok(op(Opcode::Push(2), &[0x00, 0x05]))
        );
    }

    #[test]
    fn parse_push_hex_padded() {
        assert_eq!(
            parse_line(&[ident("PUSH4"), hex(&[0x01, 0x02])], 1),
            Ok(op(Opcode::Push(4), &[0x00, 0x00, 0x01, 0x02]))
        );
    }

    #[test]
    fn parse_push_zero() {
        assert_eq!(
            parse_line(&[ident("PUSH1"), num(0)], 1),
            Ok(op(Opcode::Push(1), &[0x00]))
        );
    }

    #[test]
    fn parse_push_leading_zero_bytes_ignored() {
        assert_eq!(
            parse_line(&[ident("PUSH1"), hex(&[0x00, 0x00, 0x2a])], 1),
            Ok(op(Opcode::Push(1), &[0x2a]))
        );
    }

    #[test]
    fn parse_push32_full_width() {
        let bytes: Vec<u8> = (1..=32).collect();
        assert_eq!(
            parse_line(&[ident("PUSH32"), hex(&bytes)], 1),
            Ok(op(Opcode::Push(32), &bytes))
        );
    }

    #[test]
    fn parse_push_too_wide() {
        let err = parse_line(&[ident("PUSH1"), num(256)], 4).unwrap_err();
        assert_eq!(
            err,
            AsmError::ImmediateTooWide {
                line: 4,
                width: 1,
                token: "256".to_string()
            }
        );
    }

    #[test]
    fn parse_push_missing_argument() {
        let err = parse_line(&[ident("PUSH3")], 2).unwrap_err();
        assert_eq!(
            err,
            AsmError::MissingArgument {
                line: 2,
                opcode: "PUSH3",
                expected: 1
            }
        );
    }

    #[test]
    fn parse_push_ident_argument() {
        let err = parse_line(&[ident("PUSH1"), ident("ADD")], 1).unwrap_err();
        assert!(matches!(err, AsmError::UnexpectedToken { .. }));
    }

    #[test]
    fn parse_data() {
        assert_eq!(
            parse_line(&[ident("DATA"), hex(&[0xFE, 0x0C])], 1),
            Ok(Some(ParseResult::Data(vec![0xFE, 0x0C])))
        );
    }

    #[test]
    fn parse_data_requires_hex() {
        let err = parse_line(&[ident("DATA"), num(12)], 6).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidNumber {
                line: 6,
                token: "12".to_string()
            }
        );
        assert!(matches!(
            parse_line(&[ident("DATA")], 1),
            Err(AsmError::MissingArgument { .. })
        ));
    }

    #[test]
    fn unknown_opcode() {
        let err = parse_line(&[ident("PUSH0")], 3).unwrap_err();
        assert_eq!(
            err,
            AsmError::UnknownOpcode {
                line: 3,
                token: "PUSH0".to_string()
            }
        );
    }

    #[test]
    fn number_as_first_token() {
        let err = parse_line(&[num(42)], 1).unwrap_err();
        assert!(matches!(err, AsmError::UnexpectedToken { .. }));
    }

    #[test]
    fn encode_op_and_data() {
        let mut out = Vec::new();
        op(Opcode::Push(2), &[0x01, 0x00])
            .unwrap()
            .encode_into(&mut out);
        ParseResult::Data(vec![0xEE]).encode_into(&mut out);
        assert_eq!(out, vec![0x61, 0x01, 0x00, 0xEE]);
    }
}
