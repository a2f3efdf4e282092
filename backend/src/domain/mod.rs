//! # Domain Module
//!
//! Availability rules: which products a user can get, given the city they
//! live in and optionally a product category. The domain works on an
//! in-memory snapshot and is independent of the storage backend that filled
//! it.

pub mod product_availability_service;

pub use product_availability_service::ProductAvailabilityService;
