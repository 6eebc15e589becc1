use crate::entity::{Instrument, InstrumentName};
use crate::KernelError;

/// Reads over the instrument catalogue. Each call runs in its own transaction
/// and sees availability as of the store's current date.
#[async_trait::async_trait]
pub trait InstrumentQuery: Sync + Send + 'static {
    async fn find_available(&self) -> error_stack::Result<Vec<Instrument>, KernelError>;

    async fn find_available_by_name(
        &self,
        name: &InstrumentName,
    ) -> error_stack::Result<Vec<Instrument>, KernelError>;
}

pub trait DependOnInstrumentQuery: Sync + Send + 'static {
    type InstrumentQuery: InstrumentQuery;
    fn instrument_query(&self) -> &Self::InstrumentQuery;
}

impl<T> DependOnInstrumentQuery for T
where
    T: InstrumentQuery,
{
    type InstrumentQuery = T;
    fn instrument_query(&self) -> &Self::InstrumentQuery {
        self
    }
}
