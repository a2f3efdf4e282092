//! # CSV Storage Module
//!
//! Flat-file backend. Products and users live in two comma-separated files
//! inside a single data directory:
//!
//! ```text
//! data/
//! ├── Product.csv   productId,productName,productCategory,price,availableCity
//! └── User.csv      userId,userName,email,phoneNumber,city
//! ```
//!
//! The first line of each file is a header and is skipped. The backend is
//! read-only: inserts, deletes and updates fail with
//! `StorageError::UnsupportedOperation` without touching the files.

pub mod connection;
pub mod product_repository;
pub mod user_repository;

pub use connection::{CsvConnection, PRODUCTS_FILE_NAME, USERS_FILE_NAME};
pub use product_repository::CsvProductRepository;
pub use user_repository::CsvUserRepository;
