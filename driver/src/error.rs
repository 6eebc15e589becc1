use std::fmt::{Display, Formatter};

use error_stack::{Context, Report};
use kernel::KernelError;

#[derive(Debug)]
pub enum DriverError {
    SqlX,
    Timeout,
    Env,
    /// A row did not convert into a valid entity.
    Conversion,
    /// A mutation touched a number of rows other than the one it targets.
    AffectedRows,
}

impl Display for DriverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::SqlX => write!(f, "SqlX error"),
            DriverError::Timeout => write!(f, "Connection timed out"),
            DriverError::Env => write!(f, "Environment error"),
            DriverError::Conversion => write!(f, "Row conversion error"),
            DriverError::AffectedRows => write!(f, "Unexpected affected row count"),
        }
    }
}

impl Context for DriverError {}

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, DriverError>;
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, DriverError> {
        self.map_err(|error| match error {
            sqlx::Error::PoolTimedOut => Report::from(error).change_context(DriverError::Timeout),
            _ => Report::from(error).change_context(DriverError::SqlX),
        })
    }
}

/// Lifts a driver report into the store-level kind the rest of the
/// workspace understands.
pub(crate) fn lift(report: Report<DriverError>) -> Report<KernelError> {
    let kind = match report.current_context() {
        DriverError::Timeout => KernelError::Timeout,
        DriverError::Env => KernelError::Internal,
        DriverError::SqlX | DriverError::Conversion | DriverError::AffectedRows => {
            KernelError::Store
        }
    };
    report.change_context(kind)
}
