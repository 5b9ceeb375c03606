//! Tokenizer for evmcore assembly text.

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// An identifier (opcode mnemonic or directive). Always uppercase.
    Ident(String),
    /// A decimal literal.
    Number(u64),
    /// A `0x` literal as big-endian bytes. An odd digit count gets a leading
    /// zero nibble.
    Hex(Vec<u8>),
}

impl Token {
    /// The token as it would be written back out, for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Ident(s) => s.clone(),
            Token::Number(n) => n.to_string(),
            Token::Hex(bytes) => format!("0x{}", hex::encode(bytes)),
        }
    }
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let invalid = || AsmError::InvalidNumber {
            line: line_num,
            token: word.to_string(),
        };
        let token = if let Some(digits) = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X"))
        {
            if digits.is_empty() {
                return Err(invalid());
            }
            let padded = if digits.len() % 2 == 1 {
                format!("0{digits}")
            } else {
                digits.to_string()
            };
            Token::Hex(hex::decode(padded).map_err(|_| invalid())?)
        } else if word.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
            Token::Number(word.parse().map_err(|_| invalid())?)
        } else {
            Token::Ident(word.to_uppercase())
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Token {
        Token::Ident(s.to_string())
    }

    #[test]
    fn empty_line() {
        assert_eq!(tokenize_line("", 1).unwrap(), vec![]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize_line("   \t  ", 1).unwrap(), vec![]);
    }

    #[test]
    fn comment_only() {
        assert_eq!(tokenize_line("; this is a comment", 1).unwrap(), vec![]);
    }

    #[test]
    fn opcode_with_comment() {
        assert_eq!(
            tokenize_line("ADD ; add two values", 1).unwrap(),
            vec![ident("ADD")]
        );
    }

    #[test]
    fn lowercase_opcode_uppercased() {
        assert_eq!(tokenize_line("  mstore", 1).unwrap(), vec![ident("MSTORE")]);
    }

    #[test]
    fn push_with_decimal_arg() {
        assert_eq!(
            tokenize_line("PUSH1 42", 1).unwrap(),
            vec![ident("PUSH1"), Token::Number(42)]
        );
    }

    #[test]
    fn push_with_hex_arg() {
        assert_eq!(
            tokenize_line("PUSH2 0x0100", 1).unwrap(),
            vec![ident("PUSH2"), Token::Hex(vec![0x01, 0x00])]
        );
    }

    #[test]
    fn hex_uppercase_prefix_and_digits() {
        assert_eq!(
            tokenize_line("DATA 0XABCD", 1).unwrap(),
            vec![ident("DATA"), Token::Hex(vec![0xAB, 0xCD])]
        );
    }

    #[test]
    fn odd_hex_digits_left_padded() {
        assert_eq!(
            tokenize_line("PUSH2 0x123", 1).unwrap(),
            vec![ident("PUSH2"), Token::Hex(vec![0x01, 0x23])]
        );
    }

    #[test]
    fn hex_longer_than_u64() {
        let tokens = tokenize_line("PUSH32 0x0102030405060708090a0b0c0d0e0f10", 1).unwrap();
        assert_eq!(tokens[1], Token::Hex((1..=16).collect()));
    }

    #[test]
    fn invalid_hex_number() {
        let err = tokenize_line("PUSH1 0xZZ", 3).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidNumber {
                line: 3,
                token: "0xZZ".to_string()
            }
        );
    }

    #[test]
    fn bare_hex_prefix_is_invalid() {
        assert!(matches!(
            tokenize_line("DATA 0x", 1),
            Err(AsmError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn invalid_decimal_number() {
        let err = tokenize_line("PUSH32 99999999999999999999999", 5).unwrap_err();
        assert_eq!(
            err,
            AsmError::InvalidNumber {
                line: 5,
                token: "99999999999999999999999".to_string()
            }
        );
    }

    #[test]
    fn describe_round_trips_text() {
        assert_eq!(Token::Hex(vec![0x0a]).describe(), "0x0a");
        assert_eq!(Token::Number(7).describe(), "7");
        assert_eq!(ident("ADD").describe(), "ADD");
    }
}
