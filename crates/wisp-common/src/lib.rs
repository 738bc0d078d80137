//! Common utilities for the wisp layout engine.
//!
//! This crate provides shared infrastructure used by all wisp components:
//! - **Warning System** - deduplicated diagnostics for unsupported input

pub mod warning;
