//! Payment records. Card fields travel with the order only when the method
//! is CARD.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    TestBooking,
    VehicleDisc,
    Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
    Eft,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::Eft => "EFT",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "CARD" => Ok(PaymentMethod::Card),
            "CASH" => Ok(PaymentMethod::Cash),
            "EFT" => Ok(PaymentMethod::Eft),
            other => Err(format!("unknown payment method '{other}'")),
        }
    }
}

/// Card fields as typed into the payment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub cardholder_name: String,
    pub card_number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    /// Drop the fields that must not survive a failed submission attempt.
    /// Cardholder name and expiry are kept so a retry is not a full re-type.
    pub fn clear_secrets(&mut self) {
        self.card_number.clear();
        self.cvv.clear();
    }
}

/// Payment payload sent to the backend, standalone or nested in an
/// appointment/disc order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub payment_type: PaymentType,
    pub method: PaymentMethod,
    pub amount: u32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
}

/// A recorded payment as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: u64,
    pub payment_type: PaymentType,
    pub method: PaymentMethod,
    pub amount: u32,
    pub date: NaiveDate,
}
