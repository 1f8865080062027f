//! Domain models for AgroSync quality control

mod delivery;
mod payment;
mod pricing;
mod quality;

pub use delivery::*;
pub use payment::*;
pub use pricing::*;
pub use quality::*;
