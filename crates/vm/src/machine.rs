//! Execution context: the frame call stack and captured return data.

use evmcore_common::Code;
use tracing::debug;

use crate::frame::Frame;
use crate::memory::DEFAULT_MEMORY_LIMIT;
use crate::stack::MAX_STACK_DEPTH;

/// Interpreter limits applied to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    /// Words per data stack. Values above 1024 are clamped.
    pub stack_limit: usize,
    /// Bytes of memory per frame.
    pub memory_limit: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            stack_limit: MAX_STACK_DEPTH,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl VmConfig {
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    pub fn with_stack_limit(mut self, limit: usize) -> Self {
        self.stack_limit = limit.min(MAX_STACK_DEPTH);
        self
    }
}

/// State for one top-level invocation.
///
/// Frames form a strictly nested chain: the last frame is current and the
/// one below it is its caller. The return-data buffer holds whatever the most
/// recent RETURN emitted, across all frames.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    pub(crate) frames: Vec<Frame>,
    pub(crate) return_data: Vec<u8>,
    pub(crate) config: VmConfig,
}

impl ExecutionContext {
    pub fn new(config: VmConfig) -> Self {
        Self {
            frames: Vec::new(),
            return_data: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Push a new frame for `code` above the current one and make it current.
    pub fn alloc_frame(&mut self, code: Code) -> &mut Frame {
        let depth = self.frames.len();
        debug!(depth = depth + 1, code_len = code.len(), "frame allocated");
        self.frames.push(Frame::new(code, &self.config));
        &mut self.frames[depth]
    }

    /// Drop the current frame; its caller becomes current. No-op when empty.
    pub fn free_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug!(
                depth = self.frames.len() + 1,
                pc = frame.pc,
                memory = frame.memory.len(),
                "frame released"
            );
        }
    }

    /// Drop every frame. Used after a fault.
    pub fn abandon(&mut self) {
        if !self.frames.is_empty() {
            debug!(depth = self.frames.len(), "frame chain abandoned");
        }
        self.frames.clear();
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// Number of live frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Replace the return-data buffer.
    pub fn set_return_data(&mut self, data: Vec<u8>) {
        self.return_data = data;
    }

    pub fn return_data(&self) -> &[u8] {
        &self.return_data
    }

    /// Move the return data out, leaving the buffer empty.
    pub fn take_return_data(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.return_data)
    }
}
