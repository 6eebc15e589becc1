use crate::entity::{InstrumentId, Rental, StudentId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier: 'static + Sync + Send {
    /// Inserts `rental` as a non-terminated row, committing only when exactly
    /// one row was written.
    async fn create(&self, rental: &Rental) -> error_stack::Result<(), KernelError>;

    /// Marks the open rental of `instrument_id` by `student_id` as terminated,
    /// committing only when exactly one row changed.
    async fn terminate(
        &self,
        student_id: &StudentId,
        instrument_id: &InstrumentId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnRentalModifier: 'static + Sync + Send {
    type RentalModifier: RentalModifier;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}

impl<T> DependOnRentalModifier for T
where
    T: RentalModifier,
{
    type RentalModifier = T;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        self
    }
}
