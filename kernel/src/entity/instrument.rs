mod brand;
mod id;
mod name;
mod price;

pub use self::{brand::*, id::*, name::*, price::*};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

/// Snapshot of an instrument row as the store reported it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Instrument {
    id: InstrumentId,
    name: InstrumentName,
    brand: InstrumentBrand,
    price: InstrumentPrice,
}

impl Instrument {
    pub fn new(
        id: InstrumentId,
        name: InstrumentName,
        brand: InstrumentBrand,
        price: InstrumentPrice,
    ) -> Self {
        Self {
            id,
            name,
            brand,
            price,
        }
    }
}
