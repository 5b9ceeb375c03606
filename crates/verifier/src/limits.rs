//! Size limits for evmcore code.

use crate::error::VerifyError;
use evmcore_common::Code;

/// Maximum code size in bytes (EIP-170).
pub const MAX_CODE_SIZE: usize = 24_576;

/// Maximum data stack height.
pub const MAX_STACK_HEIGHT: usize = 1_024;

/// Run the limits check.
pub fn check_limits(code: &Code) -> Vec<VerifyError> {
    let mut errors = Vec::new();

    if code.len() > MAX_CODE_SIZE {
        errors.push(VerifyError::CodeTooLarge {
            size: code.len(),
            limit: MAX_CODE_SIZE,
        });
    }

    errors
}
