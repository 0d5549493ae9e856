//! Shared test fixtures for the plugguard workspace.
//!
//! This crate exists because integration tests in several member crates
//! need the same two fixtures at runtime (not behind `#[cfg(test)]`):
//! deterministic store-only zip archives standing in for dependency
//! archives, and minimal class artifacts with a chosen shape.

#![forbid(unsafe_code)]

mod classbytes;
mod zip;

pub use classbytes::{class_bytes, interface_bytes};
pub use zip::write_store_zip;
