mod instrument;
mod rental;

use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use error_stack::{Report, ResultExt};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

use crate::env;
use crate::error::{lift, ConvertError, DriverError};

static POSTGRES_URL: &str = "POSTGRES_URL";

/// Gateway to the rental store.
///
/// Holds a single long-lived connection, opened when the gateway is built.
/// Every operation exposed through the kernel ports runs in a transaction of
/// its own and either commits or rolls back before returning.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL).map_err(lift)?;
        Self::connect(&url).await
    }

    pub async fn connect(url: &str) -> error_stack::Result<Self, KernelError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect(url)
            .await
            .convert_error()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Could not connect to datasource.")?;
        tracing::debug!("Connected to rental store");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error().map_err(lift)?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        DerefMut::deref_mut(&mut self.0)
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error().map_err(lift)
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error().map_err(lift)
    }
}

/// Result of the rollback attempted after a failed store operation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RollbackOutcome {
    RolledBack,
    Failed(String),
}

impl Display for RollbackOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RollbackOutcome::RolledBack => write!(f, "Transaction rolled back"),
            RollbackOutcome::Failed(reason) => write!(
                f,
                "Also failed to roll back transaction because of: {reason}"
            ),
        }
    }
}

impl RollbackOutcome {
    fn of(result: error_stack::Result<(), KernelError>) -> Self {
        match result {
            Ok(()) => RollbackOutcome::RolledBack,
            Err(report) => RollbackOutcome::Failed(
                report
                    .downcast_ref::<sqlx::Error>()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| report.current_context().to_string()),
            ),
        }
    }
}

impl PostgresTransaction {
    /// Commits when `outcome` succeeded, rolls back otherwise.
    ///
    /// A failed operation is reported as [`KernelError::Store`] with the
    /// rollback outcome and `failure` attached on top of the original cause.
    /// A failed commit carries no rollback outcome: the transaction is dropped
    /// uncommitted and sqlx rolls it back on the connection's next use.
    pub(in crate::database) async fn conclude<T>(
        self,
        outcome: error_stack::Result<T, DriverError>,
        failure: String,
    ) -> error_stack::Result<T, KernelError> {
        match outcome {
            Ok(value) => {
                self.commit().await.attach_printable(failure)?;
                Ok(value)
            }
            Err(report) => {
                let rollback = RollbackOutcome::of(self.roll_back().await);
                tracing::warn!("{failure} ({rollback})");
                Err(store_failure(report, rollback, failure))
            }
        }
    }
}

fn store_failure(
    report: Report<DriverError>,
    rollback: RollbackOutcome,
    failure: String,
) -> Report<KernelError> {
    report
        .change_context(KernelError::Store)
        .attach_printable(rollback)
        .attach_printable(failure)
}

pub(in crate::database) fn ensure_single_row(
    rows_affected: u64,
) -> error_stack::Result<(), DriverError> {
    if rows_affected != 1 {
        return Err(Report::new(DriverError::AffectedRows).attach_printable(format!(
            "Expected exactly one affected row but got {rows_affected}"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(in crate::database) mod fixture {
    use kernel::prelude::entity::{InstrumentId, StudentId};
    use kernel::KernelError;
    use rand::Rng;
    use sqlx::Executor;
    use time::{Date, Duration};

    use super::PostgresDatabase;
    use crate::error::{lift, ConvertError};

    static SCHEMA: &str = include_str!("../../../schema.sql");

    pub async fn database() -> error_stack::Result<PostgresDatabase, KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.pool.acquire().await.convert_error().map_err(lift)?;
        (&mut *con)
            .execute(SCHEMA)
            .await
            .convert_error()
            .map_err(lift)?;
        Ok(db)
    }

    /// The store's own date, which is what availability is judged against.
    pub async fn today(db: &PostgresDatabase) -> error_stack::Result<Date, KernelError> {
        sqlx::query_scalar("SELECT CURRENT_DATE")
            .fetch_one(&db.pool)
            .await
            .convert_error()
            .map_err(lift)
    }

    pub fn days_after(today: Date, days: i64) -> Date {
        today + Duration::days(days)
    }

    pub fn unique_name(prefix: &str) -> String {
        format!("{prefix}-{}", rand::thread_rng().gen::<u32>())
    }

    pub fn unique_student() -> StudentId {
        StudentId::new(rand::thread_rng().gen_range(1_000_000..i32::MAX))
    }

    pub async fn insert_instrument(
        db: &PostgresDatabase,
        name: &str,
        brand: &str,
        price: i32,
    ) -> error_stack::Result<InstrumentId, KernelError> {
        let id: i32 = sqlx::query_scalar(
            // language=postgresql
            r#"
            INSERT INTO instrument (name, brand, price)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(brand)
        .bind(price)
        .fetch_one(&db.pool)
        .await
        .convert_error()
        .map_err(lift)?;
        Ok(InstrumentId::new(id))
    }

    pub async fn count_rentals(
        db: &PostgresDatabase,
        instrument_id: &InstrumentId,
    ) -> error_stack::Result<i64, KernelError> {
        sqlx::query_scalar(
            // language=postgresql
            r#"
            SELECT COUNT(*) FROM rented_instrument WHERE instrument_id = $1
            "#,
        )
        .bind(instrument_id.as_ref())
        .fetch_one(&db.pool)
        .await
        .convert_error()
        .map_err(lift)
    }
}
