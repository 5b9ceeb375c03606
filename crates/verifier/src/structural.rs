//! Execution path discovery.
//!
//! The opcode subset has no jumps, so execution from pc 0 follows exactly one
//! straight-line path. This pass decodes that path until STOP, RETURN, the end
//! of the code, or the first byte that cannot be decoded, and builds the
//! [`PathContext`] used by later passes. Bytes past a terminator are never
//! executed and are not inspected.

use crate::error::VerifyError;
use evmcore_common::{Code, DecodeError, Opcode};

/// How the execution path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// A STOP at the given byte offset.
    Stop { at: usize },
    /// A RETURN at the given byte offset.
    Return { at: usize },
    /// The pc ran off the end of the code (implicit STOP).
    EndOfCode,
    /// Decoding failed at the given byte offset; execution would fault here.
    Invalid { at: usize },
}

/// One decoded step of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub at: usize,
    pub opcode: Opcode,
}

/// Context built from the path pass, consumed by later passes.
#[derive(Debug, Clone)]
pub struct PathContext {
    /// Decoded instructions in execution order, including the terminator.
    pub steps: Vec<PathStep>,
    /// How the path ends.
    pub terminator: Terminator,
    /// Bytes covered by the path, from 0 up to and including the last
    /// decoded instruction.
    pub reachable_len: usize,
}

/// Run the path pass.
///
/// Returns the PathContext and any errors found.
pub fn check_structural(code: &Code) -> (PathContext, Vec<VerifyError>) {
    let mut errors = Vec::new();
    let mut steps = Vec::new();
    let mut pc = 0;

    let terminator = loop {
        let instr = match code.instruction_at(pc) {
            None => break Terminator::EndOfCode,
            Some(Ok(instr)) => instr,
            Some(Err(DecodeError::UnsupportedOpcode(byte))) => {
                errors.push(VerifyError::UnsupportedOpcode { at: pc, byte });
                break Terminator::Invalid { at: pc };
            }
            Some(Err(DecodeError::TruncatedImmediate {
                width, available, ..
            })) => {
                errors.push(VerifyError::TruncatedPush {
                    at: pc,
                    width,
                    available,
                });
                break Terminator::Invalid { at: pc };
            }
        };

        steps.push(PathStep {
            at: pc,
            opcode: instr.opcode,
        });
        let at = pc;
        pc += instr.size();

        match instr.opcode {
            Opcode::Stop => break Terminator::Stop { at },
            Opcode::Return => break Terminator::Return { at },
            _ => {}
        }
    };

    let reachable_len = match terminator {
        Terminator::Invalid { at } => at,
        _ => pc,
    };

    let ctx = PathContext {
        steps,
        terminator,
        reachable_len,
    };
    (ctx, errors)
}
