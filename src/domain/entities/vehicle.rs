//! Vehicles and the admin-facing entity addressing.

use serde::{Deserialize, Serialize};

use crate::domain::entities::disc::VehicleDisc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Car,
    Truck,
    Motorcycle,
    Bus,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "CAR",
            VehicleType::Truck => "TRUCK",
            VehicleType::Motorcycle => "MOTORCYCLE",
            VehicleType::Bus => "BUS",
        }
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleType::Car),
            "TRUCK" => Ok(VehicleType::Truck),
            "MOTORCYCLE" => Ok(VehicleType::Motorcycle),
            "BUS" => Ok(VehicleType::Bus),
            other => Err(format!("unknown vehicle type '{other}'")),
        }
    }
}

/// Registration payload assembled by the vehicle wizard.
///
/// `owner_id` stays optional at the contract level: the gateway refuses to
/// send the request when it is absent rather than letting the backend guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub name: String,
    pub vehicle_type: VehicleType,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub engine_number: String,
    pub chassis_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    pub owner_id: Option<u64>,
}

/// A registered vehicle, with its disc when one has been issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub engine_number: String,
    pub chassis_number: String,
    #[serde(default)]
    pub license_plate: Option<String>,
    pub owner_id: u64,
    #[serde(default)]
    pub disc: Option<VehicleDisc>,
}

/// Entity families addressable by the admin delete operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Applicant,
    Booking,
    Payment,
    TestAppointment,
    VehicleDisc,
    Ticket,
}

impl EntityKind {
    /// URL path segment for the entity family.
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::Applicant => "applicants",
            EntityKind::Booking => "booking",
            EntityKind::Payment => "payment",
            EntityKind::TestAppointment => "testappointment",
            EntityKind::VehicleDisc => "vehicledisc",
            EntityKind::Ticket => "ticket",
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "applicant" => Ok(EntityKind::Applicant),
            "booking" => Ok(EntityKind::Booking),
            "payment" => Ok(EntityKind::Payment),
            "appointment" | "test-appointment" => Ok(EntityKind::TestAppointment),
            "disc" | "vehicle-disc" => Ok(EntityKind::VehicleDisc),
            "ticket" => Ok(EntityKind::Ticket),
            other => Err(format!("unknown entity kind '{other}'")),
        }
    }
}
