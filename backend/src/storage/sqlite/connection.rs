use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Decode, Row, Type};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};

/// SqlConnector opens one database connection per operation and closes it
/// again once the operation has finished, whatever its outcome.
#[derive(Debug, Clone)]
pub struct SqlConnector {
    url: String,
    options: SqliteConnectOptions,
}

impl SqlConnector {
    /// Create a connector for a database URL such as `sqlite://products.db`
    pub fn new(url: &str) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::data_access(format!("invalid database url '{}'", url), e))?;

        Ok(Self {
            url: url.to_string(),
            options,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open a fresh connection
    pub async fn acquire(&self) -> StorageResult<SqliteConnection> {
        debug!("Opening database connection to {}", self.url);
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to connect to {}", self.url), e))
    }

    /// Close a connection obtained from `acquire`. Close failures are logged,
    /// never returned, so they cannot mask the operation's own result.
    pub async fn release(&self, connection: SqliteConnection) {
        if let Err(e) = connection.close().await {
            warn!("Failed to close database connection to {}: {}", self.url, e);
        }
    }

    /// Create the database file and both tables if they don't exist yet
    pub async fn setup_schema(&self) -> StorageResult<()> {
        let options = self.options.clone().create_if_missing(true);
        let mut connection = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| StorageError::data_access(format!("unable to connect to {}", self.url), e))?;

        let result = Self::create_tables(&mut connection).await;
        self.release(connection).await;
        result?;

        info!("Database schema ready at {}", self.url);
        Ok(())
    }

    async fn create_tables(connection: &mut SqliteConnection) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS product (
                productId TEXT PRIMARY KEY,
                productName TEXT NOT NULL,
                productCategory TEXT NOT NULL,
                price INTEGER NOT NULL,
                availableCity TEXT NOT NULL
            );
            "#,
        )
        .execute(&mut *connection)
        .await
        .map_err(|e| StorageError::data_access("unable to create product table", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user (
                userId TEXT PRIMARY KEY,
                userName TEXT NOT NULL,
                email TEXT NOT NULL,
                phoneNumber TEXT NOT NULL,
                city TEXT NOT NULL
            );
            "#,
        )
        .execute(&mut *connection)
        .await
        .map_err(|e| StorageError::data_access("unable to create user table", e))?;

        Ok(())
    }
}

/// Decode one column of a row. Type and null mismatches mean the stored row
/// is malformed; anything else is a data access failure.
pub(crate) fn decode_column<'r, T>(row: &'r SqliteRow, index: usize, record: &str) -> StorageResult<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(index).map_err(|e| match e {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. } => {
            StorageError::malformed(record, format!("column {}: {}", index, e))
        }
        other => StorageError::data_access(format!("unable to read {}", record), other),
    })
}
