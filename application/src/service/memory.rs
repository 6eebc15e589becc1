use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use error_stack::Report;
use kernel::interface::query::{InstrumentQuery, RentalQuery};
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    Instrument, InstrumentBrand, InstrumentId, InstrumentName, InstrumentPrice, IsTerminated,
    Rental, StudentId,
};
use kernel::KernelError;
use time::macros::date;
use time::Date;

/// Store double that evaluates availability against a fixed date.
pub struct InMemoryStore {
    today: Date,
    instruments: Vec<Instrument>,
    rentals: Mutex<Vec<Rental>>,
    calls: AtomicUsize,
    fail_reads: bool,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn with_guitar_and_piano() -> Self {
        let instrument = |id: i32, name: &str, brand: &str, price: i32| {
            Instrument::new(
                InstrumentId::new(id),
                InstrumentName::new(name),
                InstrumentBrand::new(brand),
                InstrumentPrice::new(price).unwrap(),
            )
        };
        Self {
            today: date!(2024 - 01 - 15),
            instruments: vec![
                instrument(1, "Guitar", "Fender", 100),
                instrument(2, "Piano", "Yamaha", 500),
            ],
            rentals: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn with_instrument(mut self, id: i32, name: &str) -> Self {
        self.instruments.push(Instrument::new(
            InstrumentId::new(id),
            InstrumentName::new(name),
            InstrumentBrand::new("Generic"),
            InstrumentPrice::new(10).unwrap(),
        ));
        self
    }

    pub fn with_rental(self, rental: Rental) -> Self {
        self.rentals.lock().unwrap().push(rental);
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn rentals(&self) -> Vec<Rental> {
        self.rentals.lock().unwrap().clone()
    }

    pub fn store_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, failing: bool) -> error_stack::Result<(), KernelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if failing {
            return Err(Report::new(KernelError::Store).attach_printable("store is down"));
        }
        Ok(())
    }

    fn available(&self) -> Vec<Instrument> {
        let rentals = self.rentals.lock().unwrap();
        self.instruments
            .iter()
            .filter(|instrument| {
                !rentals.iter().any(|rental| {
                    rental.instrument_id() == instrument.id() && rental.is_active_on(self.today)
                })
            })
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl InstrumentQuery for InMemoryStore {
    async fn find_available(&self) -> error_stack::Result<Vec<Instrument>, KernelError> {
        self.enter(self.fail_reads)?;
        Ok(self.available())
    }

    async fn find_available_by_name(
        &self,
        name: &InstrumentName,
    ) -> error_stack::Result<Vec<Instrument>, KernelError> {
        self.enter(self.fail_reads)?;
        Ok(self
            .available()
            .into_iter()
            .filter(|instrument| instrument.name() == name)
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalQuery for InMemoryStore {
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        self.enter(self.fail_reads)?;
        Ok(self
            .rentals()
            .into_iter()
            .filter(|rental| rental.student_id() == student_id && !rental.terminated().as_ref())
            .collect())
    }
}

#[async_trait::async_trait]
impl RentalModifier for InMemoryStore {
    async fn create(&self, rental: &Rental) -> error_stack::Result<(), KernelError> {
        self.enter(self.fail_writes)?;
        let open = Rental::open(*rental.student_id(), *rental.instrument_id(), *rental.period());
        self.rentals.lock().unwrap().push(open);
        Ok(())
    }

    async fn terminate(
        &self,
        student_id: &StudentId,
        instrument_id: &InstrumentId,
    ) -> error_stack::Result<(), KernelError> {
        self.enter(self.fail_writes)?;
        let mut rentals = self.rentals.lock().unwrap();
        let matching = rentals
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                r.student_id() == student_id
                    && r.instrument_id() == instrument_id
                    && !r.terminated().as_ref()
            })
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        if matching.len() != 1 {
            return Err(Report::new(KernelError::Store)
                .attach_printable(format!("{} rows matched", matching.len())));
        }
        let rental = &mut rentals[matching[0]];
        *rental = Rental::new(
            *rental.student_id(),
            *rental.instrument_id(),
            *rental.period(),
            IsTerminated::new(true),
        );
        Ok(())
    }
}
