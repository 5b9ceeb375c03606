//! Fetch-decode-execute loop over an [`ExecutionContext`].
//!
//! The interpreter always executes the current (innermost) frame. When a
//! frame terminates it is released and its caller resumes where it left off.
//! The loop ends when the last frame terminates or any frame faults.
//!
//! ```text
//!            step ok             last frame STOP / end of code
//!   Running ────────▶ Running ──────────────────────────────▶ Halted
//!      │                 │        last frame RETURN
//!      │                 └──────────────────────────────────▶ Returned
//!      └── fault ───────────────────────────────────────────▶ Faulted
//! ```

use tracing::{debug, trace};

use crate::error::Fault;
use crate::frame::Flow;
use crate::machine::ExecutionContext;

/// How a completed invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// STOP, or execution fell off the end of the code.
    Halted,
    /// RETURN.
    Returned,
}

/// Interpreter lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
    Returned,
    Faulted,
}

impl From<ExitStatus> for State {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Halted => State::Halted,
            ExitStatus::Returned => State::Returned,
        }
    }
}

/// Result of a completed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: ExitStatus,
    /// Bytes from the most recent RETURN in the invocation, if any.
    pub return_data: Vec<u8>,
}

/// Drives the frames of an execution context.
pub struct Interpreter<'c> {
    ctx: &'c mut ExecutionContext,
    state: State,
    fault: Option<Fault>,
}

impl<'c> Interpreter<'c> {
    pub fn new(ctx: &'c mut ExecutionContext) -> Self {
        Self {
            ctx,
            state: State::Running,
            fault: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The fault that stopped execution, if any.
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn context(&self) -> &ExecutionContext {
        self.ctx
    }

    /// Execute one instruction of the current frame.
    ///
    /// Returns `Ok(None)` while frames remain, `Ok(Some(status))` once the
    /// outermost frame has terminated. A fault is returned as `Err` and the
    /// faulting frame is left in place for inspection; further calls return
    /// the same fault.
    pub fn step(&mut self) -> Result<Option<ExitStatus>, Fault> {
        match self.state {
            State::Running => {}
            State::Halted => return Ok(Some(ExitStatus::Halted)),
            State::Returned => return Ok(Some(ExitStatus::Returned)),
            State::Faulted => {
                if let Some(fault) = &self.fault {
                    return Err(fault.clone());
                }
            }
        }

        let depth = self.ctx.depth();
        let Some(frame) = self.ctx.current_frame_mut() else {
            self.state = State::Halted;
            return Ok(Some(ExitStatus::Halted));
        };

        trace!(
            depth,
            pc = frame.pc,
            byte = ?frame.code.as_bytes().get(frame.pc),
            height = frame.stack.height(),
            "step"
        );

        let status = match frame.execute_next() {
            Ok(Flow::Continue) => return Ok(None),
            Ok(Flow::Stop) => ExitStatus::Halted,
            Ok(Flow::Return(data)) => {
                self.ctx.set_return_data(data);
                ExitStatus::Returned
            }
            Err(fault) => {
                self.state = State::Faulted;
                self.fault = Some(fault.clone());
                return Err(fault);
            }
        };

        self.ctx.free_frame();
        if !self.ctx.is_empty() {
            return Ok(None);
        }
        self.state = status.into();
        Ok(Some(status))
    }

    /// Step until the outermost frame terminates.
    ///
    /// On a fault the whole frame chain is abandoned before the fault is
    /// returned.
    pub fn run(mut self) -> Result<Outcome, Fault> {
        loop {
            match self.step() {
                Ok(None) => {}
                Ok(Some(status)) => {
                    let return_data = self.ctx.take_return_data();
                    debug!(?status, return_len = return_data.len(), "invocation finished");
                    return Ok(Outcome {
                        status,
                        return_data,
                    });
                }
                Err(fault) => {
                    self.ctx.abandon();
                    debug!(%fault, "invocation faulted");
                    return Err(fault);
                }
            }
        }
    }
}
