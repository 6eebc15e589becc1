mod instrument;
mod rental;

pub use self::{instrument::*, rental::*};
