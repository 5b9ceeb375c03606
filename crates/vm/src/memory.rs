//! Byte-addressed frame memory.
//!
//! Memory starts empty and grows in place to cover any range that is touched.
//! New bytes are zero. It never shrinks.

use evmcore_common::{Word, WORD_BYTES};

/// Default upper bound on a frame's memory size: 32 MiB.
pub const DEFAULT_MEMORY_LIMIT: usize = 32 * 1024 * 1024;

/// Growth was refused. `requested` is the end of the touched range, which may
/// not fit in 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryError {
    pub requested: u128,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
    limit: usize,
}

impl Memory {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Grow to at least `offset + len` bytes.
    ///
    /// Zero-length accesses still grow to `offset`. Growth the allocator
    /// refuses is reported like growth past the limit.
    pub fn ensure(&mut self, offset: u64, len: u64) -> Result<(), MemoryError> {
        let end = offset as u128 + len as u128;
        let refused = MemoryError {
            requested: end,
            limit: self.limit,
        };
        if end > self.limit as u128 {
            return Err(refused);
        }
        let end = end as usize;
        if end > self.bytes.len() {
            self.bytes
                .try_reserve_exact(end - self.bytes.len())
                .map_err(|_| refused)?;
            self.bytes.resize(end, 0);
        }
        Ok(())
    }

    /// Write `word` big-endian at `[offset, offset + 32)`.
    pub fn store_word(&mut self, offset: u64, word: &Word) -> Result<(), MemoryError> {
        self.ensure(offset, WORD_BYTES as u64)?;
        let start = offset as usize;
        self.bytes[start..start + WORD_BYTES].copy_from_slice(&word.to_be_bytes());
        Ok(())
    }

    /// Borrow `[offset, offset + len)`, growing first.
    pub fn read(&mut self, offset: u64, len: u64) -> Result<&[u8], MemoryError> {
        self.ensure(offset, len)?;
        let start = offset as usize;
        Ok(&self.bytes[start..start + len as usize])
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MEMORY_LIMIT)
    }
}
