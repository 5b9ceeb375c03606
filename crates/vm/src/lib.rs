//! evmcore interpreter: executes EVM bytecode for a small opcode subset.
//!
//! The interpreter runs a chain of frames held by an [`ExecutionContext`].
//! Each [`Frame`] owns:
//! - a bounded data stack of 256-bit words (at most 1024)
//! - a zero-initialised byte memory that grows on access
//! - a program counter into its immutable code buffer
//!
//! # Usage
//!
//! ```
//! use evmcore_common::Code;
//! use evmcore_vm::{run, ExitStatus};
//!
//! // PUSH1 5, PUSH1 3, ADD, PUSH1 0, MSTORE, PUSH1 0x20, PUSH1 0, RETURN
//! let code = Code::from_hex("0x600560030160005260206000f3").unwrap();
//!
//! let outcome = run(&code).unwrap();
//! assert_eq!(outcome.status, ExitStatus::Returned);
//! assert_eq!(outcome.return_data.len(), 32);
//! assert_eq!(outcome.return_data[31], 8);
//! ```

pub mod error;
pub mod execute;
pub mod frame;
pub mod interpreter;
pub mod machine;
pub mod memory;
pub mod stack;

pub use error::Fault;
pub use frame::Frame;
pub use interpreter::{ExitStatus, Interpreter, Outcome, State};
pub use machine::{ExecutionContext, VmConfig};
pub use memory::{Memory, DEFAULT_MEMORY_LIMIT};
pub use stack::{Stack, MAX_STACK_DEPTH};

use evmcore_common::Code;

/// Execute `code` as a top-level invocation with default limits.
///
/// # Errors
///
/// Returns [`Fault`] if any instruction faults. The frame chain is
/// discarded in that case.
pub fn run(code: &Code) -> Result<Outcome, Fault> {
    run_with_config(code, VmConfig::default())
}

/// Execute `code` as a top-level invocation with the given limits.
pub fn run_with_config(code: &Code, config: VmConfig) -> Result<Outcome, Fault> {
    let mut ctx = ExecutionContext::new(config);
    ctx.alloc_frame(code.clone());
    Interpreter::new(&mut ctx).run()
}
