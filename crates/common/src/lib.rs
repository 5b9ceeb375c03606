//! evmcore common types and bytecode decoding.
//!
//! This crate provides the foundational data structures shared by the
//! interpreter, verifier and assembler:
//!
//! - [`Word`]: 256-bit little-endian word with mod 2^256 arithmetic
//! - [`Opcode`]: the implemented opcode subset and its decode table
//! - [`Instruction`]: an opcode plus its immediate bytes
//! - [`Code`]: an immutable, shareable code buffer
//! - [`DecodeError`]: errors from decoding byte streams
//! - [`HexError`]: errors from parsing hex-encoded code

pub mod code;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod word;

// Re-export commonly used types at the crate root.
pub use code::Code;
pub use error::{DecodeError, HexError};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use word::{Word, WORD_BYTES};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_word() -> impl Strategy<Value = Word> {
        prop::array::uniform32(any::<u8>()).prop_map(Word::from_le_bytes)
    }

    proptest! {
        #[test]
        fn add_commutes(a in arb_word(), b in arb_word()) {
            prop_assert_eq!(a.wrapping_add(b), b.wrapping_add(a));
        }

        #[test]
        fn sub_undoes_add(a in arb_word(), b in arb_word()) {
            prop_assert_eq!(a.wrapping_add(b).wrapping_sub(b), a);
        }

        #[test]
        fn mul_associates(a in arb_word(), b in arb_word(), c in arb_word()) {
            prop_assert_eq!(
                a.wrapping_mul(b.wrapping_mul(c)),
                a.wrapping_mul(b).wrapping_mul(c)
            );
        }

        #[test]
        fn mul_commutes(a in arb_word(), b in arb_word()) {
            prop_assert_eq!(a.wrapping_mul(b), b.wrapping_mul(a));
        }

        #[test]
        fn mul_distributes_over_add(a in arb_word(), b in arb_word(), c in arb_word()) {
            prop_assert_eq!(
                a.wrapping_mul(b.wrapping_add(c)),
                a.wrapping_mul(b).wrapping_add(a.wrapping_mul(c))
            );
        }

        /// Against native 128-bit arithmetic for operands that fit in 64 bits.
        #[test]
        fn small_operands_match_u128(a in any::<u64>(), b in any::<u64>()) {
            let (wa, wb) = (Word::from(a), Word::from(b));
            prop_assert_eq!(wa.wrapping_add(wb), Word::from(a as u128 + b as u128));
            prop_assert_eq!(wa.wrapping_mul(wb), Word::from(a as u128 * b as u128));
            if a >= b {
                prop_assert_eq!(wa.wrapping_sub(wb), Word::from(a - b));
            }
        }

        #[test]
        fn be_bytes_roundtrip(a in arb_word()) {
            prop_assert_eq!(Word::from_be_slice(&a.to_be_bytes()), Some(a));
        }

        /// Any byte string sweeps to completion without panicking, and every
        /// successfully decoded instruction re-encodes to its source bytes.
        #[test]
        fn sweep_reencodes(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let code = Code::new(bytes.clone());
            for (pc, decoded) in code.instructions() {
                if let Ok(instr) = decoded {
                    let mut out = Vec::new();
                    instr.encode_into(&mut out);
                    prop_assert_eq!(&out[..], &bytes[pc..pc + instr.size()]);
                }
            }
        }
    }
}
