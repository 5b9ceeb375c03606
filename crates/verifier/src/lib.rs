//! evmcore verifier: static analysis for bytecode.
//!
//! The verifier checks a [`Code`] buffer for faults BEFORE execution.
//! It collects ALL errors (not just the first) and returns them.
//!
//! # Usage
//!
//! ```
//! use evmcore_common::Code;
//! use evmcore_verifier::{verify, Terminator};
//!
//! // PUSH1 5, PUSH1 3, ADD, STOP
//! let code = Code::from_hex("0x600560030100").unwrap();
//!
//! let report = verify(&code).unwrap();
//! assert_eq!(report.max_stack_height, 2);
//! assert_eq!(report.terminator, Terminator::Stop { at: 5 });
//! ```
//!
//! # Passes
//!
//! 1. **Limits**: code size
//! 2. **Structural**: decode the single execution path from pc 0
//! 3. **Stack**: height simulation along that path
//!
//! Code that passes can still fault at runtime only by exceeding the
//! interpreter's memory limit.

pub mod error;
pub mod limits;
pub mod stack;
pub mod structural;

pub use error::VerifyError;
pub use limits::{MAX_CODE_SIZE, MAX_STACK_HEIGHT};
pub use structural::Terminator;

use evmcore_common::Code;
use tracing::debug;

/// Summary of a successfully verified code buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeReport {
    /// Total code size in bytes.
    pub code_len: usize,
    /// Bytes from 0 through the terminator. Anything after is never executed.
    pub reachable_len: usize,
    /// Number of instructions on the path, including the terminator.
    pub instruction_count: usize,
    /// Highest data stack height reached.
    pub max_stack_height: usize,
    /// How the path ends.
    pub terminator: Terminator,
}

/// Verify a code buffer.
///
/// Returns a [`CodeReport`] if the code passes all checks, or
/// `Err(Vec<VerifyError>)` with all errors found.
pub fn verify(code: &Code) -> Result<CodeReport, Vec<VerifyError>> {
    let mut all_errors = Vec::new();

    // Pass 1: Limits (independent)
    all_errors.extend(limits::check_limits(code));

    // Pass 2: Structural (builds PathContext)
    let (ctx, structural_errors) = structural::check_structural(code);
    all_errors.extend(structural_errors);

    // Pass 3: Stack, over whatever prefix of the path decoded
    let (max_stack_height, stack_errors) = stack::check_stack(&ctx);
    all_errors.extend(stack_errors);

    debug!(
        code_len = code.len(),
        reachable = ctx.reachable_len,
        errors = all_errors.len(),
        "verified code"
    );

    if all_errors.is_empty() {
        Ok(CodeReport {
            code_len: code.len(),
            reachable_len: ctx.reachable_len,
            instruction_count: ctx.steps.len(),
            max_stack_height,
            terminator: ctx.terminator,
        })
    } else {
        Err(all_errors)
    }
}
