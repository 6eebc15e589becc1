use error_stack::{Report, ResultExt};
use sqlx::PgConnection;
use time::Date;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    InstrumentId, IsTerminated, Rental, RentalPeriod, StudentId,
};
use kernel::KernelError;

use crate::database::postgres::{ensure_single_row, PostgresDatabase};
use crate::error::{ConvertError, DriverError};

#[async_trait::async_trait]
impl RentalQuery for PostgresDatabase {
    async fn find_active_by_student(
        &self,
        student_id: &StudentId,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut transaction = self.transact().await?;
        let found = PgRentalInternal::find_active_by_student(&mut transaction, student_id).await;
        transaction
            .conclude(
                found,
                format!(
                    "Could not get all rented instruments for the student id: {}",
                    student_id.as_ref()
                ),
            )
            .await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresDatabase {
    async fn create(&self, rental: &Rental) -> error_stack::Result<(), KernelError> {
        let mut transaction = self.transact().await?;
        let created = PgRentalInternal::create(&mut transaction, rental).await;
        transaction
            .conclude(
                created,
                format!(
                    "Could not rent the instrument with id: {}",
                    rental.instrument_id().as_ref()
                ),
            )
            .await
    }

    async fn terminate(
        &self,
        student_id: &StudentId,
        instrument_id: &InstrumentId,
    ) -> error_stack::Result<(), KernelError> {
        let mut transaction = self.transact().await?;
        let terminated =
            PgRentalInternal::terminate(&mut transaction, student_id, instrument_id).await;
        transaction
            .conclude(
                terminated,
                format!(
                    "Could not terminate the rental for student: {} and instrument: {}",
                    student_id.as_ref(),
                    instrument_id.as_ref()
                ),
            )
            .await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    student_id: i32,
    instrument_id: i32,
    rental_start: Date,
    rental_end: Date,
    terminated: bool,
}

impl TryFrom<RentalRow> for Rental {
    type Error = Report<DriverError>;
    fn try_from(value: RentalRow) -> Result<Self, Self::Error> {
        let period = RentalPeriod::new(value.rental_start, value.rental_end)
            .change_context(DriverError::Conversion)?;
        Ok(Rental::new(
            StudentId::new(value.student_id),
            InstrumentId::new(value.instrument_id),
            period,
            IsTerminated::new(value.terminated),
        ))
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_active_by_student(
        con: &mut PgConnection,
        student_id: &StudentId,
    ) -> error_stack::Result<Vec<Rental>, DriverError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT student_id, instrument_id, rental_start, rental_end, terminated
            FROM rented_instrument
            WHERE student_id = $1 AND terminated = FALSE
            "#,
        )
        .bind(student_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Rental::try_from).collect()
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rented_instrument (student_id, instrument_id, rental_start, rental_end, terminated)
            VALUES ($1, $2, $3, $4, FALSE)
            "#,
        )
        .bind(rental.student_id().as_ref())
        .bind(rental.instrument_id().as_ref())
        .bind(rental.period().start())
        .bind(rental.period().end())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(
            "Inserted rental of instrument {} by student {}",
            rental.instrument_id().as_ref(),
            rental.student_id().as_ref()
        );
        ensure_single_row(result.rows_affected())
    }

    async fn terminate(
        con: &mut PgConnection,
        student_id: &StudentId,
        instrument_id: &InstrumentId,
    ) -> error_stack::Result<(), DriverError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE rented_instrument
            SET terminated = TRUE
            WHERE student_id = $1 AND instrument_id = $2 AND terminated = FALSE
            "#,
        )
        .bind(student_id.as_ref())
        .bind(instrument_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        ensure_single_row(result.rows_affected())
    }
}
