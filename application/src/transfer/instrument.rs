use kernel::prelude::entity::{DestructInstrument, Instrument};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InstrumentDto {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: i32,
}

impl From<Instrument> for InstrumentDto {
    fn from(value: Instrument) -> Self {
        let DestructInstrument {
            id,
            name,
            brand,
            price,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            price: price.into(),
        }
    }
}

pub struct SearchInstrumentDto {
    pub name: Option<String>,
}
