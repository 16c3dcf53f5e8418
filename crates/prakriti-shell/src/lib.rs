//! prakriti-shell library root.
//!
//! Re-exports the config layer and the terminal renderer so integration
//! tests can exercise them without going through the binary.

pub mod config;
pub mod terminal;
