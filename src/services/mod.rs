//! Application services.
//!
//! Library management, progress statistics, and daily goals. Services operate on
//! an in-memory [`crate::domain::Collection`]; handlers load and save it through a store.

pub mod goals;
pub mod library;
pub mod stats;
