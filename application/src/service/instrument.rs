use error_stack::ResultExt;
use kernel::interface::query::{DependOnInstrumentQuery, InstrumentQuery};
use kernel::prelude::entity::InstrumentName;

use crate::transfer::{InstrumentDto, SearchInstrumentDto};
use crate::RentalError;

#[async_trait::async_trait]
pub trait GetAvailableInstrumentService: 'static + Sync + Send + DependOnInstrumentQuery {
    async fn get_all_available(&self) -> error_stack::Result<Vec<InstrumentDto>, RentalError> {
        let instruments = self
            .instrument_query()
            .find_available()
            .await
            .change_context(RentalError::ListFailed)
            .attach_printable("Unable to list available instruments.")?;

        Ok(instruments.into_iter().map(InstrumentDto::from).collect())
    }

    /// An absent or blank name yields nothing without touching the store.
    async fn get_all_available_by_name(
        &self,
        dto: SearchInstrumentDto,
    ) -> error_stack::Result<Vec<InstrumentDto>, RentalError> {
        let Some(name) = dto.name.filter(|name| !name.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let instruments = self
            .instrument_query()
            .find_available_by_name(&InstrumentName::new(name.clone()))
            .await
            .change_context(RentalError::SearchFailed)
            .attach_printable_lazy(|| format!("Could not search for instruments named: {name}"))?;

        Ok(instruments.into_iter().map(InstrumentDto::from).collect())
    }
}

impl<T> GetAvailableInstrumentService for T where T: DependOnInstrumentQuery {}
