//! 256-bit machine words.
//!
//! A [`Word`] is stored as 32 bytes in **little-endian** order: byte 0 is the
//! least significant. Bytecode immediates and memory use big-endian, so every
//! crossing between the two goes through [`Word::from_be_slice`] or
//! [`Word::to_be_bytes`].
//!
//! All arithmetic wraps modulo 2^256. There is no sign bit.

use std::fmt;

/// Number of bytes in a word.
pub const WORD_BYTES: usize = 32;

/// A 256-bit unsigned integer, little-endian byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word([u8; WORD_BYTES]);

impl Word {
    /// The value 0.
    pub const ZERO: Word = Word([0; WORD_BYTES]);

    /// The value 2^256 - 1.
    pub const MAX: Word = Word([0xFF; WORD_BYTES]);

    /// Build a word from little-endian bytes.
    pub const fn from_le_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Word(bytes)
    }

    /// The little-endian bytes of this word.
    pub const fn to_le_bytes(self) -> [u8; WORD_BYTES] {
        self.0
    }

    /// Borrow the little-endian bytes of this word.
    pub fn as_le_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    /// Build a word from a big-endian byte slice of at most 32 bytes.
    ///
    /// Shorter slices are treated as left-padded with zeros, so the last
    /// source byte always lands in byte 0. Returns `None` for slices longer
    /// than 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > WORD_BYTES {
            return None;
        }
        let mut le = [0u8; WORD_BYTES];
        for (i, &b) in bytes.iter().rev().enumerate() {
            le[i] = b;
        }
        Some(Word(le))
    }

    /// The big-endian bytes of this word (byte 31 of the word comes first).
    pub fn to_be_bytes(&self) -> [u8; WORD_BYTES] {
        let mut be = self.0;
        be.reverse();
        be
    }

    /// The low 64 bits. The upper 24 bytes are ignored.
    pub fn low_u64(&self) -> u64 {
        let mut low = [0u8; 8];
        low.copy_from_slice(&self.0[..8]);
        u64::from_le_bytes(low)
    }

    /// Returns true if the word is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Addition modulo 2^256.
    pub fn wrapping_add(self, rhs: Word) -> Word {
        let mut out = [0u8; WORD_BYTES];
        let mut carry = 0u16;
        for (i, slot) in out.iter_mut().enumerate() {
            let sum = self.0[i] as u16 + rhs.0[i] as u16 + carry;
            *slot = sum as u8;
            carry = sum >> 8;
        }
        Word(out)
    }

    /// Subtraction modulo 2^256.
    pub fn wrapping_sub(self, rhs: Word) -> Word {
        let mut out = [0u8; WORD_BYTES];
        let mut borrow = 0i16;
        for (i, slot) in out.iter_mut().enumerate() {
            let mut diff = self.0[i] as i16 - rhs.0[i] as i16 - borrow;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            } else {
                borrow = 0;
            }
            *slot = diff as u8;
        }
        Word(out)
    }

    /// Multiplication modulo 2^256.
    ///
    /// Schoolbook multiplication into a 512-bit intermediate, keeping the
    /// low 32 bytes.
    pub fn wrapping_mul(self, rhs: Word) -> Word {
        let mut wide = [0u8; 2 * WORD_BYTES];
        for i in 0..WORD_BYTES {
            let a = self.0[i] as u32;
            if a == 0 {
                continue;
            }
            let mut carry = 0u32;
            for j in 0..WORD_BYTES {
                // 255 + 255 * 255 + 255 == 0xFFFF, so this never exceeds 16 bits.
                let cur = wide[i + j] as u32 + a * rhs.0[j] as u32 + carry;
                wide[i + j] = cur as u8;
                carry = cur >> 8;
            }
            wide[i + WORD_BYTES] = carry as u8;
        }

        let mut out = [0u8; WORD_BYTES];
        out.copy_from_slice(&wide[..WORD_BYTES]);
        Word(out)
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        let mut le = [0u8; WORD_BYTES];
        le[..8].copy_from_slice(&value.to_le_bytes());
        Word(le)
    }
}

impl From<u128> for Word {
    fn from(value: u128) -> Self {
        let mut le = [0u8; WORD_BYTES];
        le[..16].copy_from_slice(&value.to_le_bytes());
        Word(le)
    }
}

impl fmt::LowerHex for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = hex::encode(self.to_be_bytes());
        let trimmed = digits.trim_start_matches('0');
        let body = if trimmed.is_empty() { "0" } else { trimmed };
        if f.alternate() {
            write!(f, "0x{body}")
        } else {
            f.write_str(body)
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self:#x})")
    }
}
