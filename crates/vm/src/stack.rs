//! Bounded data stack of words.

use evmcore_common::Word;

/// Maximum number of words a frame's stack can hold.
pub const MAX_STACK_DEPTH: usize = 1024;

/// Stack capacity and operand-count errors. The interpreter attaches the pc
/// and opcode when turning these into faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    Underflow { required: usize, height: usize },
    Overflow { limit: usize },
}

/// A capacity-checked stack. The top is the last element of `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    items: Vec<Word>,
    limit: usize,
}

impl Stack {
    /// Create an empty stack holding at most `limit` words.
    ///
    /// `limit` is clamped to [`MAX_STACK_DEPTH`].
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.min(MAX_STACK_DEPTH),
        }
    }

    pub fn height(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Items bottom to top.
    pub fn as_slice(&self) -> &[Word] {
        &self.items
    }

    /// Check that at least `n` operands are present without touching the stack.
    pub fn require(&self, n: usize) -> Result<(), StackError> {
        if self.items.len() < n {
            return Err(StackError::Underflow {
                required: n,
                height: self.items.len(),
            });
        }
        Ok(())
    }

    pub fn push(&mut self, word: Word) -> Result<(), StackError> {
        if self.items.len() >= self.limit {
            return Err(StackError::Overflow { limit: self.limit });
        }
        self.items.push(word);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Word, StackError> {
        self.items.pop().ok_or(StackError::Underflow {
            required: 1,
            height: 0,
        })
    }

    /// The `n`th word from the top, 1-based (`peek(1)` is the top).
    pub fn peek(&self, n: usize) -> Result<Word, StackError> {
        self.require(n)?;
        if n == 0 {
            return Err(StackError::Underflow {
                required: 0,
                height: self.items.len(),
            });
        }
        Ok(self.items[self.items.len() - n])
    }

    /// Push a copy of the `n`th word from the top.
    pub fn dup(&mut self, n: usize) -> Result<(), StackError> {
        let word = self.peek(n)?;
        self.push(word)
    }

    /// Exchange the top with the word `n` positions below it.
    pub fn swap(&mut self, n: usize) -> Result<(), StackError> {
        self.require(n + 1)?;
        let top = self.items.len() - 1;
        self.items.swap(top, top - n);
        Ok(())
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::with_limit(MAX_STACK_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: u64) -> Word {
        Word::from(n)
    }

    fn stack_of(values: &[u64]) -> Stack {
        let mut s = Stack::default();
        for &v in values {
            s.push(w(v)).unwrap();
        }
        s
    }

    #[test]
    fn push_pop_lifo() {
        let mut s = stack_of(&[1, 2, 3]);
        assert_eq!(s.pop(), Ok(w(3)));
        assert_eq!(s.pop(), Ok(w(2)));
        assert_eq!(s.height(), 1);
    }

    #[test]
    fn pop_empty_underflows() {
        let mut s = Stack::default();
        assert_eq!(
            s.pop(),
            Err(StackError::Underflow {
                required: 1,
                height: 0
            })
        );
    }

    #[test]
    fn require_reports_height() {
        let s = stack_of(&[1]);
        assert_eq!(s.require(1), Ok(()));
        assert_eq!(
            s.require(2),
            Err(StackError::Underflow {
                required: 2,
                height: 1
            })
        );
    }

    #[test]
    fn overflow_at_limit() {
        let mut s = Stack::with_limit(2);
        s.push(w(1)).unwrap();
        s.push(w(2)).unwrap();
        assert_eq!(s.push(w(3)), Err(StackError::Overflow { limit: 2 }));
        assert_eq!(s.height(), 2);
    }

    #[test]
    fn limit_clamped_to_max_depth() {
        assert_eq!(Stack::with_limit(1 << 20).limit(), MAX_STACK_DEPTH);
    }

    #[test]
    fn full_default_stack_overflows() {
        let mut s = Stack::default();
        for i in 0..MAX_STACK_DEPTH as u64 {
            s.push(w(i)).unwrap();
        }
        assert!(matches!(s.push(w(0)), Err(StackError::Overflow { .. })));
    }

    #[test]
    fn dup_copies_nth() {
        let mut s = stack_of(&[7]);
        s.dup(1).unwrap();
        assert_eq!(s.as_slice(), &[w(7), w(7)]);

        let mut s = stack_of(&[1, 2, 3]);
        s.dup(3).unwrap();
        assert_eq!(s.as_slice(), &[w(1), w(2), w(3), w(1)]);
    }

    #[test]
    fn dup_too_deep() {
        let mut s = stack_of(&[1, 2]);
        assert_eq!(
            s.dup(3),
            Err(StackError::Underflow {
                required: 3,
                height: 2
            })
        );
    }

    #[test]
    fn swap_exchanges_top() {
        let mut s = stack_of(&[1, 2, 3]);
        s.swap(2).unwrap();
        assert_eq!(s.as_slice(), &[w(3), w(2), w(1)]);
    }

    #[test]
    fn swap1_at_height_one_underflows() {
        let mut s = stack_of(&[1]);
        assert_eq!(
            s.swap(1),
            Err(StackError::Underflow {
                required: 2,
                height: 1
            })
        );
        assert_eq!(s.as_slice(), &[w(1)]);
    }

    #[test]
    fn peek_zero_is_error() {
        let s = stack_of(&[1]);
        assert!(s.peek(0).is_err());
    }
}
