//! prakriti-core
//!
//! Pure domain types and table conventions for the Prakriti wellness analyzer.
//! No network dependency; this is the shared vocabulary of every other crate.

pub mod error;
pub mod models;
pub mod tables;
