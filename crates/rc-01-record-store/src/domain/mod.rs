//! # Domain Layer - Record Store
//!
//! - `errors`: StoreError enumeration
//! - `tables`: the three persisted tables

pub mod errors;
pub mod tables;

pub use errors::*;
pub use tables::*;
