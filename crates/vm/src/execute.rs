//! Opcode dispatch for a single frame.

use evmcore_common::{Opcode, Word};

use crate::error::Fault;
use crate::frame::{Flow, Frame};

impl Frame {
    /// Decode and execute the instruction at `pc`.
    ///
    /// A pc at or past the end of the code behaves as STOP. Operand counts
    /// are checked before anything is popped, so an underflow leaves the
    /// stack untouched.
    pub(crate) fn execute_next(&mut self) -> Result<Flow, Fault> {
        let at = self.pc;
        let (opcode, size, pushed) = match self.code.instruction_at(at) {
            None => return Ok(Flow::Stop),
            Some(Err(e)) => return Err(Fault::decode(at, e)),
            Some(Ok(instr)) => (instr.opcode, instr.size(), instr.push_value()),
        };
        self.pc = at + size;

        match opcode {
            Opcode::Stop => return Ok(Flow::Stop),
            Opcode::Add => self.exec_binary_arith(at, opcode, Word::wrapping_add)?,
            Opcode::Mul => self.exec_binary_arith(at, opcode, Word::wrapping_mul)?,
            Opcode::Sub => self.exec_binary_arith(at, opcode, Word::wrapping_sub)?,
            Opcode::Pop => self.exec_pop(at, opcode)?,
            Opcode::MStore => self.exec_mstore(at, opcode)?,
            Opcode::Push(width) => {
                // The decoder hands PUSHn exactly n <= 32 bytes, so a missing
                // value means the immediate was unusable.
                let Some(word) = pushed else {
                    return Err(Fault::UnexpectedEnd {
                        at,
                        width,
                        available: size - 1,
                    });
                };
                self.push(at, opcode, word)?
            }
            Opcode::Dup(n) => self.exec_dup(at, opcode, n as usize)?,
            Opcode::Swap(n) => self.exec_swap(at, opcode, n as usize)?,
            Opcode::Return => return self.exec_return(at, opcode),
        }
        Ok(Flow::Continue)
    }

    fn require(&self, at: usize, opcode: Opcode, n: usize) -> Result<(), Fault> {
        self.stack
            .require(n)
            .map_err(|e| Fault::stack(at, opcode, e))
    }

    fn pop(&mut self, at: usize, opcode: Opcode) -> Result<Word, Fault> {
        self.stack.pop().map_err(|e| Fault::stack(at, opcode, e))
    }

    fn push(&mut self, at: usize, opcode: Opcode, word: Word) -> Result<(), Fault> {
        self.stack
            .push(word)
            .map_err(|e| Fault::stack(at, opcode, e))
    }

    // ---- Arithmetic ----

    /// Pop B, then A; push `op(A, B)`.
    fn exec_binary_arith(
        &mut self,
        at: usize,
        opcode: Opcode,
        op: fn(Word, Word) -> Word,
    ) -> Result<(), Fault> {
        self.require(at, opcode, 2)?;
        let b = self.pop(at, opcode)?;
        let a = self.pop(at, opcode)?;
        self.push(at, opcode, op(a, b))
    }

    // ---- Stack manipulation ----

    fn exec_pop(&mut self, at: usize, opcode: Opcode) -> Result<(), Fault> {
        self.pop(at, opcode).map(drop)
    }

    fn exec_dup(&mut self, at: usize, opcode: Opcode, n: usize) -> Result<(), Fault> {
        self.stack.dup(n).map_err(|e| Fault::stack(at, opcode, e))
    }

    fn exec_swap(&mut self, at: usize, opcode: Opcode, n: usize) -> Result<(), Fault> {
        self.stack.swap(n).map_err(|e| Fault::stack(at, opcode, e))
    }

    // ---- Memory and termination ----

    /// Pop offset, then value; store the value big-endian at offset.
    fn exec_mstore(&mut self, at: usize, opcode: Opcode) -> Result<(), Fault> {
        self.require(at, opcode, 2)?;
        let offset = self.pop(at, opcode)?;
        let value = self.pop(at, opcode)?;
        self.memory
            .store_word(offset.low_u64(), &value)
            .map_err(|e| Fault::memory(at, e))
    }

    /// Pop offset, then size; copy that memory range out as return data.
    fn exec_return(&mut self, at: usize, opcode: Opcode) -> Result<Flow, Fault> {
        self.require(at, opcode, 2)?;
        let offset = self.pop(at, opcode)?;
        let size = self.pop(at, opcode)?;
        let data = self
            .memory
            .read(offset.low_u64(), size.low_u64())
            .map_err(|e| Fault::memory(at, e))?;
        Ok(Flow::Return(data.to_vec()))
    }
}
