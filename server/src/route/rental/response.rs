use crate::controller::Exhaust;
use application::transfer::RentalDto;
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    student_id: i32,
    instrument_id: i32,
    start: String,
    end: String,
    terminated: bool,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            student_id: value.student_id,
            instrument_id: value.instrument_id,
            start: value.start.to_string(),
            end: value.end.to_string(),
            terminated: value.terminated,
        }
    }
}

pub struct Presenter;

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = axum::Json<Vec<RentalResponse>>;
    fn emit(&self, output: Vec<RentalDto>) -> Self::To {
        axum::Json(output.into_iter().map(RentalResponse::from).collect())
    }
}

pub struct CreatedPresenter;

impl Exhaust<()> for CreatedPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::CREATED
    }
}
