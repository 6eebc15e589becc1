use crate::entity::{Rental, StudentId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery: Sync + Send + 'static {
    /// Every non-terminated rental of the student, whatever its dates.
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> error_stack::Result<Vec<Rental>, KernelError>;
}

pub trait DependOnRentalQuery: Sync + Send + 'static {
    type RentalQuery: RentalQuery;
    fn rental_query(&self) -> &Self::RentalQuery;
}

impl<T> DependOnRentalQuery for T
where
    T: RentalQuery,
{
    type RentalQuery = T;
    fn rental_query(&self) -> &Self::RentalQuery {
        self
    }
}
