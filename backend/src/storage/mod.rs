//! # Storage Module
//!
//! Handles all data access for products and users.
//!
//! The domain layer talks to the [`ProductStorage`] and [`UserStorage`] traits
//! only. Two backends implement them:
//!
//! - **csv**: read-only flat files (`Product.csv`, `User.csv`)
//! - **sqlite**: relational tables reached through sqlx, one connection per
//!   operation
//!
//! The [`BackendSelector`] picks one of them from configuration and hands back
//! a [`ProductStore`] / [`UserStore`], a two-variant wrapper that implements the
//! same traits. Record parsing and validation for the flat files lives in
//! [`record`]. [`import_flat_files`] copies the flat files into the relational
//! store.

pub mod csv;
pub mod import;
pub mod record;
pub mod selector;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use import::{import_flat_files, ImportSummary};
pub use record::Record;
pub use selector::{choose_backend, BackendChoice, BackendKind, BackendSelector, ProductStore, UserStore};
pub use traits::{ProductStorage, UserStorage};
