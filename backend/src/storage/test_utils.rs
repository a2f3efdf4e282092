//! Test utilities shared by the storage, domain and REST tests
//!
//! `TestEnvironment` owns a temporary data directory that holds the CSV files
//! and the SQLite database for one test. Everything is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use csv::Writer;
use shared::{Product, User};
use sqlx::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::csv::{CsvConnection, PRODUCTS_FILE_NAME, USERS_FILE_NAME};
use super::record::Record;
use super::sqlite::SqlConnector;
use crate::config::StorageConfig;
use crate::error::StorageResult;

const DATABASE_FILE_NAME: &str = "products.db";

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn csv_connection(&self) -> CsvConnection {
        CsvConnection::new(&self.base_path)
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.base_path.join(DATABASE_FILE_NAME).display())
    }

    /// Storage config pointing both backends at this environment
    pub fn config(&self) -> StorageConfig {
        StorageConfig::default()
            .with_data_directory(&self.base_path)
            .with_database_url(self.database_url())
    }

    /// Create the SQLite database with both tables and return its connector
    pub async fn sql_connector(&self) -> StorageResult<SqlConnector> {
        let connector = SqlConnector::new(&self.database_url())?;
        connector.setup_schema().await?;
        Ok(connector)
    }

    /// Run a raw statement against the test database
    pub async fn execute_sql(&self, sql: &str) -> Result<()> {
        let connector = SqlConnector::new(&self.database_url())?;
        let mut connection = connector.acquire().await?;
        sqlx::query(sql).execute(&mut connection).await?;
        connection.close().await?;
        Ok(())
    }

    pub fn write_products(&self, products: &[Product]) -> Result<()> {
        self.write_records(PRODUCTS_FILE_NAME, products)
    }

    pub fn write_users(&self, users: &[User]) -> Result<()> {
        self.write_records(USERS_FILE_NAME, users)
    }

    /// Write `Product.csv` from raw lines, header included
    pub fn write_products_file(&self, lines: &[&str]) -> Result<()> {
        self.write_lines(PRODUCTS_FILE_NAME, &Product::header_line(), lines)
    }

    /// Write `User.csv` from raw lines, header included
    pub fn write_users_file(&self, lines: &[&str]) -> Result<()> {
        self.write_lines(USERS_FILE_NAME, &User::header_line(), lines)
    }

    fn write_records<R: Record>(&self, file_name: &str, records: &[R]) -> Result<()> {
        let mut csv_writer = Writer::from_path(self.base_path.join(file_name))?;
        csv_writer.write_record(R::HEADER)?;
        for record in records {
            csv_writer.write_record(&record.to_fields())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn write_lines(&self, file_name: &str, header: &str, lines: &[&str]) -> Result<()> {
        let mut contents = format!("{}\n", header);
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }
        fs::write(self.base_path.join(file_name), contents)?;
        Ok(())
    }
}

/// Catalogue used across tests. For user U1001 (Pune) the visible products are
/// P1001, P1003 and P1005; P1006 is listed for "pune" and must not match.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("P1001", "Electric Kettle", "Kitchen", 1499, "Pune East"),
        Product::new("P1002", "Cricket Bat", "Sports", 2200, "Mumbai"),
        Product::new("P1003", "Yoga Mat", "Sports", 799, "Pune"),
        Product::new("P1004", "Desk Lamp", "Lighting", 999, "New York City"),
        Product::new("P1005", "Mixer Grinder", "kitchen", 3499, "Pune West"),
        Product::new("P1006", "Running Shoes", "SPORTS", 2999, "pune"),
    ]
}

pub fn sample_users() -> Vec<User> {
    vec![
        User::new("U1001", "Asha Rao", "asha@example.com", "9876543210", "Pune"),
        User::new("U1002", "Ravi Kumar", "ravi@example.com", "9123456780", "Mumbai"),
        User::new("U1003", "Lee Chen", "lee@example.com", "5550100", "York"),
    ]
}
