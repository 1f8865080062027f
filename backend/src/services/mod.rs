//! Business logic services for AgroSync

pub mod delivery;
pub mod farmer;
pub mod payment;
pub mod pricing;
pub mod quality;
pub mod warehouse;

pub use delivery::DeliveryService;
pub use farmer::FarmerService;
pub use payment::PaymentService;
pub use pricing::PricingService;
pub use quality::QualityService;
pub use warehouse::WarehouseService;
