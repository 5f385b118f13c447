//! Core types and trait definitions for the QR-AR experience service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod event;
pub mod experience;
pub mod query;
pub mod store;
pub mod summary;

pub use error::ValidationErrors;
