use std::fmt::Display;

use error_stack::Context;

/// Failure kinds a caller of the rental services can observe.
///
/// Store faults never surface on their own; they sit underneath one of these
/// in the report.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RentalError {
    /// The instrument is actively rented or does not exist.
    InstrumentUnavailable,
    /// The student already holds more rentals than the cap allows.
    RentalLimitExceeded,
    RentFailed,
    ListFailed,
    SearchFailed,
    TerminationFailed,
}

impl Display for RentalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalError::InstrumentUnavailable => write!(f, "Instrument unavailable"),
            RentalError::RentalLimitExceeded => write!(f, "Rental limit exceeded"),
            RentalError::RentFailed => write!(f, "Rent failed"),
            RentalError::ListFailed => write!(f, "Listing failed"),
            RentalError::SearchFailed => write!(f, "Search failed"),
            RentalError::TerminationFailed => write!(f, "Termination failed"),
        }
    }
}

impl Context for RentalError {}

/// Caller input that could not be turned into a typed request.
#[derive(Debug)]
pub struct MalformedInput;

impl Display for MalformedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed input")
    }
}

impl Context for MalformedInput {}
