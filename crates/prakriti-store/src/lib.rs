//! prakriti-store
//!
//! Thin client for the hosted store. Every read and write the screens make
//! goes through the [`backend::Backend`] trait; [`rows`] holds the typed
//! operations built on it.

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod query;
pub mod rest;
pub mod rows;
