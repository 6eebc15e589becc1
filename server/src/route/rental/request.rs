use crate::controller::Intake;
use application::transfer::{GetActiveRentalDto, RentInstrumentDto, TerminateRentalDto};
use serde::Deserialize;

/// Fields stay strings so that malformed values reach the rental service and
/// fail there like any other invalid input.
#[derive(Debug, Deserialize)]
pub struct RentRequest {
    student_id: Option<String>,
    instrument_id: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TerminateRequest {
    student_id: Option<String>,
    instrument_id: Option<String>,
}

#[derive(Debug)]
pub struct ActiveRentalRequest {
    student_id: String,
}

impl ActiveRentalRequest {
    pub fn new(student_id: String) -> Self {
        Self { student_id }
    }
}

pub struct Transformer;

impl Intake<RentRequest> for Transformer {
    type To = RentInstrumentDto;
    fn emit(
        &self,
        RentRequest {
            student_id,
            instrument_id,
            from,
            to,
        }: RentRequest,
    ) -> Self::To {
        RentInstrumentDto {
            student_id,
            instrument_id,
            from,
            to,
        }
    }
}

impl Intake<TerminateRequest> for Transformer {
    type To = TerminateRentalDto;
    fn emit(
        &self,
        TerminateRequest {
            student_id,
            instrument_id,
        }: TerminateRequest,
    ) -> Self::To {
        TerminateRentalDto {
            student_id,
            instrument_id,
        }
    }
}

impl Intake<ActiveRentalRequest> for Transformer {
    type To = GetActiveRentalDto;
    fn emit(&self, input: ActiveRentalRequest) -> Self::To {
        GetActiveRentalDto {
            student_id: Some(input.student_id),
        }
    }
}
