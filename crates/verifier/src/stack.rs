//! Stack height analysis along the execution path.
//!
//! Tracks the data stack height before every instruction using each opcode's
//! declared inputs and outputs, checking for underflow and overflow.

use crate::error::VerifyError;
use crate::limits::MAX_STACK_HEIGHT;
use crate::structural::PathContext;

/// Run the stack height check.
///
/// Returns the maximum height reached before the first error, and the
/// errors found. Simulation stops at the first error since the interpreter
/// would fault there.
pub fn check_stack(ctx: &PathContext) -> (usize, Vec<VerifyError>) {
    let mut errors = Vec::new();
    let mut height = 0usize;
    let mut max_height = 0usize;

    for step in &ctx.steps {
        let required = step.opcode.stack_inputs();
        if height < required {
            errors.push(VerifyError::StackUnderflow {
                at: step.at,
                opcode: step.opcode,
                required,
                height,
            });
            break;
        }

        let after = height - required + step.opcode.stack_outputs();
        if after > MAX_STACK_HEIGHT {
            errors.push(VerifyError::StackOverflow { at: step.at });
            break;
        }

        height = after;
        max_height = max_height.max(height);
    }

    (max_height, errors)
}
