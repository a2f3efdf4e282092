//! # Product Availability
//!
//! Shows users the products they can get in their city, reading products and
//! users from a swappable backend.
//!
//! ```text
//! IO Layer (REST API, CLI)
//!     ↓
//! Domain Layer (ProductAvailabilityService)
//!     ↓
//! Storage Layer (BackendSelector → CSV files | SQLite tables)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

pub use config::StorageConfig;
pub use domain::ProductAvailabilityService;
pub use error::{AvailabilityError, StorageError, StorageResult};
pub use storage::{import_flat_files, BackendKind, BackendSelector, ImportSummary, ProductStorage, UserStorage};
