use error_stack::{Report, ResultExt};
use kernel::prelude::entity::{DestructRental, InstrumentId, Rental, RentalPeriod, StudentId};
use time::Date;

use crate::transfer::{parse_date, parse_id};
use crate::MalformedInput;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub student_id: i32,
    pub instrument_id: i32,
    pub start: Date,
    pub end: Date,
    pub terminated: bool,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            student_id,
            instrument_id,
            period,
            terminated,
        } = value.into_destruct();
        Self {
            student_id: student_id.into(),
            instrument_id: instrument_id.into(),
            start: *period.start(),
            end: *period.end(),
            terminated: terminated.into(),
        }
    }
}

/// Raw rent input as the presentation layer collected it.
#[derive(Debug, Clone, Default)]
pub struct RentInstrumentDto {
    pub student_id: Option<String>,
    pub instrument_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TerminateRentalDto {
    pub student_id: Option<String>,
    pub instrument_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetActiveRentalDto {
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalRequest {
    pub student_id: StudentId,
    pub instrument_id: InstrumentId,
    pub period: RentalPeriod,
}

impl TryFrom<RentInstrumentDto> for RentalRequest {
    type Error = Report<MalformedInput>;
    fn try_from(value: RentInstrumentDto) -> Result<Self, Self::Error> {
        let instrument_id = parse_id("instrument_id", &value.instrument_id)?;
        let student_id = parse_id("student_id", &value.student_id)?;
        let start = parse_date("from", &value.from)?;
        let end = parse_date("to", &value.to)?;
        let period = RentalPeriod::new(start, end).change_context(MalformedInput)?;
        Ok(Self {
            student_id: StudentId::new(student_id),
            instrument_id: InstrumentId::new(instrument_id),
            period,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TerminationRequest {
    pub student_id: StudentId,
    pub instrument_id: InstrumentId,
}

impl TryFrom<TerminateRentalDto> for TerminationRequest {
    type Error = Report<MalformedInput>;
    fn try_from(value: TerminateRentalDto) -> Result<Self, Self::Error> {
        Ok(Self {
            student_id: StudentId::new(parse_id("student_id", &value.student_id)?),
            instrument_id: InstrumentId::new(parse_id("instrument_id", &value.instrument_id)?),
        })
    }
}

impl GetActiveRentalDto {
    pub fn parse(&self) -> Result<StudentId, Report<MalformedInput>> {
        Ok(StudentId::new(parse_id("student_id", &self.student_id)?))
    }
}
