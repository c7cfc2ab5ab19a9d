//! Applicant records and the registration/login payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub cellphone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
}

/// Review status assigned by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "PENDING",
            ApplicantStatus::Accepted => "ACCEPTED",
            ApplicantStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for ApplicantStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ApplicantStatus::Pending),
            "ACCEPTED" => Ok(ApplicantStatus::Accepted),
            "REJECTED" => Ok(ApplicantStatus::Rejected),
            other => Err(format!("unknown applicant status '{other}'")),
        }
    }
}

/// Which login endpoint a credential pair is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginRole {
    Applicant,
    Admin,
}

/// Registration payload assembled by the registration wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicant {
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub birth_date: NaiveDate,
    pub password: String,
    pub role: LoginRole,
    pub contact: Contact,
    pub address: Address,
}

/// A registered applicant as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub birth_date: NaiveDate,
    pub contact: Contact,
    pub address: Address,
    pub status: ApplicantStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The identity handed back by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: LoginRole,
}
