use crate::controller::Intake;
use application::transfer::SearchInstrumentDto;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    name: Option<String>,
}

pub struct Transformer;

impl Intake<SearchRequest> for Transformer {
    type To = SearchInstrumentDto;
    fn emit(&self, SearchRequest { name }: SearchRequest) -> Self::To {
        SearchInstrumentDto { name }
    }
}
