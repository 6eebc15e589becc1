use error_stack::{Report, ResultExt};
use kernel::interface::query::{
    DependOnInstrumentQuery, DependOnRentalQuery, InstrumentQuery, RentalQuery,
};
use kernel::interface::update::{DependOnRentalModifier, RentalModifier};
use kernel::prelude::entity::{Rental, RentalLimit};

use crate::transfer::{
    GetActiveRentalDto, RentInstrumentDto, RentalDto, RentalRequest, TerminateRentalDto,
    TerminationRequest,
};
use crate::RentalError;

#[async_trait::async_trait]
pub trait RentInstrumentService:
    'static + Sync + Send + DependOnInstrumentQuery + DependOnRentalQuery + DependOnRentalModifier
{
    /// Checks availability and the student's rental cap, then records the
    /// rental. The checks and the insert are separate store transactions.
    async fn rent_instrument(&self, dto: RentInstrumentDto) -> error_stack::Result<(), RentalError> {
        let failure = format!(
            "Could not rent the instrument with id: {}",
            dto.instrument_id.as_deref().unwrap_or_default()
        );
        let RentalRequest {
            student_id,
            instrument_id,
            period,
        } = RentalRequest::try_from(dto)
            .change_context(RentalError::RentFailed)
            .attach_printable_lazy(|| failure.clone())?;

        let available = self
            .instrument_query()
            .find_available()
            .await
            .change_context(RentalError::RentFailed)
            .attach_printable_lazy(|| failure.clone())?;
        if !available
            .iter()
            .any(|instrument| instrument.id() == &instrument_id)
        {
            tracing::warn!(
                "Refused rental of instrument {}: not available",
                instrument_id.as_ref()
            );
            return Err(
                Report::new(RentalError::InstrumentUnavailable).attach_printable(format!(
                    "The instrument with id: {} is already rented or does not exist.",
                    instrument_id.as_ref()
                )),
            );
        }

        let active = self
            .rental_query()
            .find_active_by_student(&student_id)
            .await
            .change_context(RentalError::RentFailed)
            .attach_printable_lazy(|| failure.clone())?;
        if RentalLimit::default().is_exceeded_by(active.len()) {
            tracing::warn!(
                "Refused rental for student {}: holds {} active rentals",
                student_id.as_ref(),
                active.len()
            );
            return Err(
                Report::new(RentalError::RentalLimitExceeded).attach_printable(format!(
                    "There are more than one instruments already rented to the student id: {}",
                    student_id.as_ref()
                )),
            );
        }

        let rental = Rental::open(student_id, instrument_id, period);
        self.rental_modifier()
            .create(&rental)
            .await
            .change_context(RentalError::RentFailed)
            .attach_printable(failure)?;

        tracing::debug!(
            "Student {} rented instrument {} from {} to {}",
            student_id.as_ref(),
            instrument_id.as_ref(),
            period.start(),
            period.end()
        );
        Ok(())
    }
}

impl<T> RentInstrumentService for T where
    T: DependOnInstrumentQuery + DependOnRentalQuery + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait TerminateRentalService: 'static + Sync + Send + DependOnRentalModifier {
    async fn terminate_rental(
        &self,
        dto: TerminateRentalDto,
    ) -> error_stack::Result<(), RentalError> {
        let failure = format!(
            "Could not terminate the rental for student: {} and instrument: {}",
            dto.student_id.as_deref().unwrap_or_default(),
            dto.instrument_id.as_deref().unwrap_or_default()
        );
        let TerminationRequest {
            student_id,
            instrument_id,
        } = TerminationRequest::try_from(dto)
            .change_context(RentalError::TerminationFailed)
            .attach_printable_lazy(|| failure.clone())?;

        self.rental_modifier()
            .terminate(&student_id, &instrument_id)
            .await
            .change_context(RentalError::TerminationFailed)
            .attach_printable(failure)?;

        tracing::debug!(
            "Student {} terminated rental of instrument {}",
            student_id.as_ref(),
            instrument_id.as_ref()
        );
        Ok(())
    }
}

impl<T> TerminateRentalService for T where T: DependOnRentalModifier {}

#[async_trait::async_trait]
pub trait GetActiveRentalService: 'static + Sync + Send + DependOnRentalQuery {
    async fn get_active_rentals(
        &self,
        dto: GetActiveRentalDto,
    ) -> error_stack::Result<Vec<RentalDto>, RentalError> {
        let failure = format!(
            "Could not list rentals of student: {}",
            dto.student_id.as_deref().unwrap_or_default()
        );
        let student_id = dto
            .parse()
            .change_context(RentalError::ListFailed)
            .attach_printable_lazy(|| failure.clone())?;

        let rentals = self
            .rental_query()
            .find_active_by_student(&student_id)
            .await
            .change_context(RentalError::ListFailed)
            .attach_printable(failure)?;

        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }
}

impl<T> GetActiveRentalService for T where T: DependOnRentalQuery {}

#[cfg(test)]
mod test {
    use kernel::prelude::entity::{
        InstrumentId, IsTerminated, Rental, RentalPeriod, StudentId,
    };
    use kernel::KernelError;
    use time::macros::date;

    use crate::service::memory::InMemoryStore;
    use crate::service::{
        GetActiveRentalService, GetAvailableInstrumentService, RentInstrumentService,
        TerminateRentalService,
    };
    use crate::transfer::{GetActiveRentalDto, RentInstrumentDto, TerminateRentalDto};
    use crate::{MalformedInput, RentalError};

    fn rent(student: &str, instrument: &str, from: &str, to: &str) -> RentInstrumentDto {
        RentInstrumentDto {
            student_id: Some(student.to_string()),
            instrument_id: Some(instrument.to_string()),
            from: Some(from.to_string()),
            to: Some(to.to_string()),
        }
    }

    fn terminate(student: &str, instrument: &str) -> TerminateRentalDto {
        TerminateRentalDto {
            student_id: Some(student.to_string()),
            instrument_id: Some(instrument.to_string()),
        }
    }

    fn january() -> RentalPeriod {
        RentalPeriod::new(date!(2024 - 01 - 01), date!(2024 - 01 - 31)).unwrap()
    }

    async fn available_ids(store: &InMemoryStore) -> Vec<i32> {
        store
            .get_all_available()
            .await
            .unwrap()
            .into_iter()
            .map(|instrument| instrument.id)
            .collect()
    }

    #[tokio::test]
    async fn rent_terminate_and_rent_again() {
        let store = InMemoryStore::with_guitar_and_piano();
        assert_eq!(available_ids(&store).await, vec![1, 2]);

        store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();
        assert_eq!(available_ids(&store).await, vec![2]);

        store.terminate_rental(terminate("10", "1")).await.unwrap();
        assert_eq!(available_ids(&store).await, vec![1, 2]);

        store
            .rent_instrument(rent("10", "1", "2024-01-10", "2024-01-20"))
            .await
            .unwrap();
        assert_eq!(available_ids(&store).await, vec![2]);
        assert_eq!(store.rentals().len(), 2);
    }

    #[tokio::test]
    async fn rental_not_spanning_today_leaves_instrument_available() {
        let store = InMemoryStore::with_guitar_and_piano();
        assert!(store.today() > date!(2024 - 01 - 10));

        store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-10"))
            .await
            .unwrap();
        assert_eq!(available_ids(&store).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn actively_rented_instrument_is_refused() {
        let store = InMemoryStore::with_guitar_and_piano().with_rental(Rental::open(
            StudentId::new(20),
            InstrumentId::new(1),
            january(),
        ));

        let report = store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();

        assert_eq!(report.current_context(), &RentalError::InstrumentUnavailable);
        assert_eq!(store.rentals().len(), 1);
    }

    #[tokio::test]
    async fn unknown_instrument_is_refused() {
        let store = InMemoryStore::with_guitar_and_piano();
        let report = store
            .rent_instrument(rent("10", "99", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::InstrumentUnavailable);
        assert!(store.rentals().is_empty());
    }

    #[tokio::test]
    async fn student_with_two_open_rentals_is_refused() {
        let store = InMemoryStore::with_guitar_and_piano()
            .with_instrument(3, "Drums")
            .with_instrument(4, "Flute");
        store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();
        store
            .rent_instrument(rent("10", "2", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();

        let report = store
            .rent_instrument(rent("10", "3", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::RentalLimitExceeded);
        assert_eq!(store.rentals().len(), 2);

        store
            .rent_instrument(rent("11", "3", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn limit_counts_open_rentals_outside_today() {
        let future = RentalPeriod::new(date!(2024 - 06 - 01), date!(2024 - 06 - 30)).unwrap();
        let store = InMemoryStore::with_guitar_and_piano()
            .with_rental(Rental::open(StudentId::new(10), InstrumentId::new(1), future))
            .with_rental(Rental::open(StudentId::new(10), InstrumentId::new(2), future));

        let report = store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::RentalLimitExceeded);
    }

    #[tokio::test]
    async fn terminated_rentals_do_not_count_towards_limit() {
        let store = InMemoryStore::with_guitar_and_piano()
            .with_rental(Rental::new(
                StudentId::new(10),
                InstrumentId::new(1),
                january(),
                IsTerminated::new(true),
            ))
            .with_rental(Rental::new(
                StudentId::new(10),
                InstrumentId::new(2),
                january(),
                IsTerminated::new(true),
            ));

        store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn malformed_input_fails_before_any_store_call() {
        let store = InMemoryStore::with_guitar_and_piano();

        let mut missing = rent("10", "1", "2024-01-01", "2024-01-31");
        missing.instrument_id = None;
        for dto in [
            missing,
            rent("ten", "1", "2024-01-01", "2024-01-31"),
            rent("10", "1", "2024-01-31", "2024-01-01"),
        ] {
            let report = store.rent_instrument(dto).await.unwrap_err();
            assert_eq!(report.current_context(), &RentalError::RentFailed);
            assert!(report.contains::<MalformedInput>());
        }
        assert_eq!(store.store_calls(), 0);
    }

    #[tokio::test]
    async fn failed_insert_is_reported_as_rent_failure() {
        let store = InMemoryStore::with_guitar_and_piano().failing_writes();
        let report = store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::RentFailed);
        assert!(report.contains::<KernelError>());
        assert!(store.rentals().is_empty());
    }

    #[tokio::test]
    async fn failed_availability_read_is_reported_as_rent_failure() {
        let store = InMemoryStore::with_guitar_and_piano().failing_reads();
        let report = store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::RentFailed);
    }

    #[tokio::test]
    async fn terminating_unknown_or_terminated_rental_fails() {
        let store = InMemoryStore::with_guitar_and_piano();

        let report = store
            .terminate_rental(terminate("10", "1"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::TerminationFailed);

        store
            .rent_instrument(rent("10", "1", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();
        store.terminate_rental(terminate("10", "1")).await.unwrap();
        let before = store.rentals();

        let report = store
            .terminate_rental(terminate("10", "1"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::TerminationFailed);
        assert_eq!(store.rentals(), before);
    }

    #[tokio::test]
    async fn termination_needs_both_ids() {
        let store = InMemoryStore::with_guitar_and_piano();
        let report = store
            .terminate_rental(TerminateRentalDto {
                student_id: Some("10".to_string()),
                instrument_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::TerminationFailed);
        assert_eq!(store.store_calls(), 0);
    }

    #[tokio::test]
    async fn active_rentals_of_a_student_are_listed() {
        let store = InMemoryStore::with_guitar_and_piano();
        store
            .rent_instrument(rent("10", "2", "2024-01-01", "2024-01-31"))
            .await
            .unwrap();

        let rentals = store
            .get_active_rentals(GetActiveRentalDto {
                student_id: Some("10".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(rentals.len(), 1);
        assert_eq!(rentals[0].instrument_id, 2);
        assert_eq!(rentals[0].start, date!(2024 - 01 - 01));
        assert!(!rentals[0].terminated);

        let report = store
            .get_active_rentals(GetActiveRentalDto { student_id: None })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &RentalError::ListFailed);
    }
}
