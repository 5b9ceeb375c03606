//! A single invocation's execution state.

use evmcore_common::Code;

use crate::machine::VmConfig;
use crate::memory::Memory;
use crate::stack::Stack;

/// What the frame wants the interpreter to do after one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    /// STOP, or the pc ran off the end of the code.
    Stop,
    /// RETURN with the copied memory slice.
    Return(Vec<u8>),
}

/// One invocation: code, program counter, data stack and memory.
///
/// The calling frame is whichever frame sits below this one in the
/// [`ExecutionContext`](crate::ExecutionContext).
#[derive(Debug, Clone)]
pub struct Frame {
    /// The code being executed. Never written to.
    pub(crate) code: Code,
    /// Index of the next byte to decode. `0 <= pc <= code.len()` while
    /// executing normally.
    pub(crate) pc: usize,
    pub(crate) stack: Stack,
    pub(crate) memory: Memory,
}

impl Frame {
    /// A fresh frame at pc 0 with an empty stack and memory.
    pub fn new(code: Code, config: &VmConfig) -> Self {
        Self {
            code,
            pc: 0,
            stack: Stack::with_limit(config.stack_limit),
            memory: Memory::with_limit(config.memory_limit),
        }
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// True once the pc has reached the end of the code.
    pub fn at_end(&self) -> bool {
        self.pc >= self.code.len()
    }
}
