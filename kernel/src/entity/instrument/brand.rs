use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct InstrumentBrand(String);

impl InstrumentBrand {
    pub fn new(brand: impl Into<String>) -> Self {
        Self(brand.into())
    }
}
