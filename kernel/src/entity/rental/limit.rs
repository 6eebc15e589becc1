use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Number of non-terminated rentals a student may already hold and still rent
/// another instrument.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalLimit(usize);

impl RentalLimit {
    pub fn new(limit: impl Into<usize>) -> Self {
        Self(limit.into())
    }

    pub fn is_exceeded_by(&self, active_rentals: usize) -> bool {
        active_rentals > self.0
    }
}

impl Default for RentalLimit {
    fn default() -> Self {
        Self::new(1usize)
    }
}
