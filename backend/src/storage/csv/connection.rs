use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::error::{StorageError, StorageResult};
use crate::storage::record::Record;

pub const PRODUCTS_FILE_NAME: &str = "Product.csv";
pub const USERS_FILE_NAME: &str = "User.csv";

/// CsvConnection locates the product and user files inside a data directory
/// and reads them one whole file at a time
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection rooted at a data directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn products_file_path(&self) -> PathBuf {
        self.base_directory.join(PRODUCTS_FILE_NAME)
    }

    pub fn users_file_path(&self) -> PathBuf {
        self.base_directory.join(USERS_FILE_NAME)
    }

    /// Read every record of a file, skipping the header line.
    ///
    /// Each line goes through [`Record::parse_line`] untouched, so quoting has
    /// no special meaning and a blank line is a record with the wrong field
    /// count. The file handle lives only for the duration of this call. A
    /// single malformed line fails the whole read; no partial list is returned.
    pub fn read_records<R: Record>(&self, file_path: &Path) -> StorageResult<Vec<R>> {
        let file = File::open(file_path).map_err(|e| {
            StorageError::data_access(
                format!("unable to access the {} store at {}", R::ENTITY, file_path.display()),
                e,
            )
        })?;

        let mut records = Vec::new();

        for (index, line) in BufReader::new(file).lines().enumerate().skip(1) {
            let line = line.map_err(|e| {
                StorageError::data_access(
                    format!("unable to read the {} store at {}", R::ENTITY, file_path.display()),
                    e,
                )
            })?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            match R::parse_line(line) {
                Ok(entity) => records.push(entity),
                Err(e) => {
                    error!("Rejecting {} record on line {} of {}: {}", R::ENTITY, index + 1, file_path.display(), e);
                    return Err(e);
                }
            }
        }

        debug!("Read {} {} records from {}", records.len(), R::ENTITY, file_path.display());
        Ok(records)
    }
}

/// Error for any write attempted against the flat-file backend
pub(crate) fn unsupported(operation: &'static str, entity: &'static str) -> StorageError {
    StorageError::UnsupportedOperation {
        operation,
        entity,
        backend: "csv",
    }
}
