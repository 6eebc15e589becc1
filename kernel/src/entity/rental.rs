mod limit;
mod period;
mod terminated;

pub use self::{limit::*, period::*, terminated::*};
use crate::entity::{InstrumentId, StudentId};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

/// One occupancy interval of an instrument by a student.
///
/// Rows are never deleted; ending a rental early flips [`IsTerminated`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Rental {
    student_id: StudentId,
    instrument_id: InstrumentId,
    period: RentalPeriod,
    terminated: IsTerminated,
}

impl Rental {
    pub fn new(
        student_id: StudentId,
        instrument_id: InstrumentId,
        period: RentalPeriod,
        terminated: IsTerminated,
    ) -> Self {
        Self {
            student_id,
            instrument_id,
            period,
            terminated,
        }
    }

    /// A rental that has not been terminated yet.
    pub fn open(student_id: StudentId, instrument_id: InstrumentId, period: RentalPeriod) -> Self {
        Self::new(student_id, instrument_id, period, IsTerminated::new(false))
    }

    /// Whether this rental occupies its instrument on `date`.
    pub fn is_active_on(&self, date: time::Date) -> bool {
        !self.terminated.as_ref() && self.period.contains(date)
    }
}
