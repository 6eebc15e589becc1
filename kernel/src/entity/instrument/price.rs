use error_stack::Report;
use serde::Serialize;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Fromln, AsRefln)]
pub struct InstrumentPrice(i32);

impl InstrumentPrice {
    pub fn new(price: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let price = price.into();
        if price < 0 {
            return Err(Report::new(KernelError::InvalidValue)
                .attach_printable(format!("Instrument price must not be negative: {price}")));
        }
        Ok(Self(price))
    }
}
