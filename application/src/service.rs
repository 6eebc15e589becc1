mod instrument;
mod rental;

pub use self::{instrument::*, rental::*};

#[cfg(test)]
mod memory;
