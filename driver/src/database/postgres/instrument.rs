use error_stack::{Report, ResultExt};
use sqlx::PgConnection;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::InstrumentQuery;
use kernel::prelude::entity::{
    Instrument, InstrumentBrand, InstrumentId, InstrumentName, InstrumentPrice,
};
use kernel::KernelError;

use crate::database::postgres::PostgresDatabase;
use crate::error::{ConvertError, DriverError};

#[async_trait::async_trait]
impl InstrumentQuery for PostgresDatabase {
    async fn find_available(&self) -> error_stack::Result<Vec<Instrument>, KernelError> {
        let mut transaction = self.transact().await?;
        let found = PgInstrumentInternal::find_available(&mut transaction).await;
        transaction
            .conclude(found, "Could not list instruments.".to_string())
            .await
    }

    async fn find_available_by_name(
        &self,
        name: &InstrumentName,
    ) -> error_stack::Result<Vec<Instrument>, KernelError> {
        let mut transaction = self.transact().await?;
        let found = PgInstrumentInternal::find_available_by_name(&mut transaction, name).await;
        transaction
            .conclude(
                found,
                format!(
                    "Could not search for instruments named: {}",
                    name.as_ref()
                ),
            )
            .await
    }
}

#[derive(sqlx::FromRow)]
struct InstrumentRow {
    id: i32,
    name: String,
    brand: String,
    price: i32,
}

impl TryFrom<InstrumentRow> for Instrument {
    type Error = Report<DriverError>;
    fn try_from(value: InstrumentRow) -> Result<Self, Self::Error> {
        let price = InstrumentPrice::new(value.price)
            .change_context(DriverError::Conversion)
            .attach_printable_lazy(|| format!("Instrument {} has an invalid price", value.id))?;
        Ok(Instrument::new(
            InstrumentId::new(value.id),
            InstrumentName::new(value.name),
            InstrumentBrand::new(value.brand),
            price,
        ))
    }
}

pub(in crate::database) struct PgInstrumentInternal;

impl PgInstrumentInternal {
    async fn find_available(
        con: &mut PgConnection,
    ) -> error_stack::Result<Vec<Instrument>, DriverError> {
        let rows = sqlx::query_as::<_, InstrumentRow>(
            // language=postgresql
            r#"
            SELECT id, name, brand, price
            FROM instrument
            WHERE id NOT IN (
                SELECT instrument_id
                FROM rented_instrument
                WHERE rental_start <= CURRENT_DATE
                  AND rental_end >= CURRENT_DATE
                  AND terminated = FALSE
            )
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        tracing::debug!("Found {} available instruments", rows.len());
        rows.into_iter().map(Instrument::try_from).collect()
    }

    async fn find_available_by_name(
        con: &mut PgConnection,
        name: &InstrumentName,
    ) -> error_stack::Result<Vec<Instrument>, DriverError> {
        let rows = sqlx::query_as::<_, InstrumentRow>(
            // language=postgresql
            r#"
            SELECT id, name, brand, price
            FROM instrument
            WHERE name = $1
              AND id NOT IN (
                SELECT instrument_id
                FROM rented_instrument
                WHERE rental_start <= CURRENT_DATE
                  AND rental_end >= CURRENT_DATE
                  AND terminated = FALSE
            )
            "#,
        )
        .bind(name.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Instrument::try_from).collect()
    }
}
