//! HTTP handlers for AgroSync

mod delivery;
mod farmer;
mod health;
mod payment;
mod pricing;
mod quality;
mod warehouse;

pub use delivery::*;
pub use farmer::*;
pub use health::*;
pub use payment::*;
pub use pricing::*;
pub use quality::*;
pub use warehouse::*;
