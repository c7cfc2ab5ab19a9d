//! Test appointments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::payment::PaymentOrder;

/// The two bookable license tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestType {
    Learners,
    Drivers,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Learners => "LEARNERS",
            TestType::Drivers => "DRIVERS",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TestType::Learners => "Learners Test",
            TestType::Drivers => "Drivers Test",
        }
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "LEARNERS" => Ok(TestType::Learners),
            "DRIVERS" => Ok(TestType::Drivers),
            other => Err(format!("unknown test type '{other}'")),
        }
    }
}

/// Combined appointment-plus-payment payload; one submission creates both
/// records on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentOrder {
    pub applicant_id: u64,
    pub test_type: TestType,
    pub venue: String,
    pub address: String,
    pub date: NaiveDate,
    pub time: String,
    pub license_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub fee: u32,
    pub payment: PaymentOrder,
}

/// A booked test as returned by the backend. `result` stays `None` until the
/// test has been taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAppointment {
    pub appointment_id: u64,
    pub applicant_id: u64,
    pub test_type: TestType,
    pub venue: String,
    pub address: String,
    pub date: NaiveDate,
    pub time: String,
    pub license_code: String,
    pub fee: u32,
    #[serde(default)]
    pub result: Option<bool>,
}
