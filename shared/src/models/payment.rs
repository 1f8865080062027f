//! Farmer payment models

use serde::{Deserialize, Serialize};

/// How a payment is settled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "Efectivo")]
    Cash,
    #[serde(rename = "Transferencia")]
    Transfer,
    #[serde(rename = "Cheque")]
    Check,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Check => "Cheque",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendiente",
            PaymentStatus::Completed => "Completado",
            PaymentStatus::Cancelled => "Cancelado",
        }
    }
}

/// Reference attached to payments created from a quality evaluation
pub fn auto_payment_reference(delivery_code: &str) -> String {
    format!("PAY-AUTO-{}", delivery_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_reference() {
        assert_eq!(auto_payment_reference("DEL-4590"), "PAY-AUTO-DEL-4590");
    }
}
