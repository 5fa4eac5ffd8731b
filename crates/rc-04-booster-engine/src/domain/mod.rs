//! # Domain Layer - Booster Engine
//!
//! Pure eligibility and pricing rules. No I/O.

pub mod rules;

pub use rules::*;
