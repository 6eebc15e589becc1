use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    /// A value object refused its input.
    InvalidValue,
    /// A store query or mutation failed; its transaction was rolled back.
    Store,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidValue => write!(f, "Invalid value"),
            KernelError::Store => write!(f, "Store operation failed"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
