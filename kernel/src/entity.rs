mod instrument;
mod rental;
mod student;

pub use self::{instrument::*, rental::*, student::*};
