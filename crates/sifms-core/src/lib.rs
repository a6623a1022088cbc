//! Core types and trait definitions for the SIFMS feedback service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod complaint;
pub mod error;
pub mod normalize;
pub mod person;
pub mod store;

pub use error::{Error, Result};
