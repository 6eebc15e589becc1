use error_stack::Report;
use serde::Serialize;
use time::Date;
use vodca::References;

use crate::KernelError;

/// Inclusive date interval of a rental.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, References)]
pub struct RentalPeriod {
    start: Date,
    end: Date,
}

impl RentalPeriod {
    pub fn new(start: Date, end: Date) -> error_stack::Result<Self, KernelError> {
        if start > end {
            return Err(Report::new(KernelError::InvalidValue)
                .attach_printable(format!("Rental starts ({start}) after it ends ({end})")));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}
