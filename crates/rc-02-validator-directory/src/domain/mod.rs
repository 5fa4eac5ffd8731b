//! # Domain Layer - Validator Directory
//!
//! - `errors`: DirectoryError enumeration
//! - `resolver`: the pure address lookup

pub mod errors;
pub mod resolver;

pub use errors::*;
pub use resolver::*;
