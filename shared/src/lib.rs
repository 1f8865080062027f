//! Shared types and the quality payment calculator for AgroSync
//!
//! This crate contains the pure domain logic shared between the backend
//! and the browser form (via WASM).

pub mod calculator;
pub mod error;
pub mod models;
pub mod validation;

pub use calculator::*;
pub use error::*;
pub use models::*;
pub use validation::*;
