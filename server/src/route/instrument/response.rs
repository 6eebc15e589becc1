use crate::controller::Exhaust;
use application::transfer::InstrumentDto;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InstrumentResponse {
    id: i32,
    name: String,
    brand: String,
    price: i32,
}

impl From<InstrumentDto> for InstrumentResponse {
    fn from(value: InstrumentDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            brand: value.brand,
            price: value.price,
        }
    }
}

pub struct Presenter;

impl Exhaust<Vec<InstrumentDto>> for Presenter {
    type To = axum::Json<Vec<InstrumentResponse>>;
    fn emit(&self, output: Vec<InstrumentDto>) -> Self::To {
        axum::Json(output.into_iter().map(InstrumentResponse::from).collect())
    }
}
