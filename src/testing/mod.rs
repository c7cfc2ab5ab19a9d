//! Shared test doubles and fixtures for wizard unit tests.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::domain::entities::{
    Applicant, ApplicantStatus, AppointmentOrder, AuthenticatedUser, DiscOrder, DiscStatus,
    EntityKind, LoginRole, NewApplicant, NewVehicle, Payment, PaymentOrder, TestAppointment,
    TicketStatus, TrafficTicket, Vehicle, VehicleDisc, VehicleType,
};
use crate::domain::{AppError, Session};
use crate::ports::LicensingGateway;

/// Fixed "today" used across wizard tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid test date")
}

/// Fixed "now" matching [`today`].
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 10, 30, 0).single().expect("valid test instant")
}

pub fn test_session() -> Session {
    Session {
        user_id: 41,
        first_name: "Thandi".to_string(),
        last_name: "Ngcobo".to_string(),
        email: "thandi@example.test".to_string(),
        role: LoginRole::Applicant,
    }
}

pub fn vehicle_with_disc(id: u64, plate: &str, expiry: DateTime<Utc>) -> Vehicle {
    Vehicle {
        id,
        name: "Toyota".to_string(),
        vehicle_type: VehicleType::Car,
        model: "Corolla".to_string(),
        year: 2020,
        color: "White".to_string(),
        engine_number: format!("EN-{id}"),
        chassis_number: format!("CH-{id}"),
        license_plate: Some(plate.to_string()),
        owner_id: 41,
        disc: Some(VehicleDisc {
            disc_id: 500 + id,
            issue_date: expiry - Duration::days(365),
            expiry_date: expiry,
            registration_fee: 850,
            status: DiscStatus::Active,
        }),
    }
}

pub fn vehicle_without_disc(id: u64, plate: &str) -> Vehicle {
    Vehicle { disc: None, ..vehicle_with_disc(id, plate, now()) }
}

/// A vehicle whose disc lapsed a month before [`now`].
pub fn expired_vehicle(id: u64, plate: &str) -> Vehicle {
    vehicle_with_disc(id, plate, now() - Duration::days(30))
}

fn sample_ticket() -> TrafficTicket {
    TrafficTicket {
        ticket_number: "TF123456".to_string(),
        offense: "Speeding - 20km/h over limit".to_string(),
        location: "Main Road, Cape Town".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid test date"),
        amount: 1500,
        due_date: NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid test date"),
        status: TicketStatus::Outstanding,
    }
}

/// Gateway double that counts calls and replies with canned data, or fails
/// the next call when a failure has been queued.
#[derive(Debug)]
pub struct RecordingGateway {
    pub applicant_calls: Cell<u32>,
    pub appointment_calls: Cell<u32>,
    pub vehicle_calls: Cell<u32>,
    pub disc_calls: Cell<u32>,
    pub payment_calls: Cell<u32>,
    fail_next: RefCell<Option<String>>,
    expired: RefCell<Vec<Vehicle>>,
    ticket: RefCell<Option<TrafficTicket>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            applicant_calls: Cell::new(0),
            appointment_calls: Cell::new(0),
            vehicle_calls: Cell::new(0),
            disc_calls: Cell::new(0),
            payment_calls: Cell::new(0),
            fail_next: RefCell::new(None),
            expired: RefCell::new(Vec::new()),
            ticket: RefCell::new(Some(sample_ticket())),
        }
    }

    /// Queue a failure for the next gateway call.
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.borrow_mut() = Some(message.to_string());
    }

    pub fn set_expired(&self, vehicles: Vec<Vehicle>) {
        *self.expired.borrow_mut() = vehicles;
    }

    /// Make ticket lookups miss.
    pub fn clear_ticket(&self) {
        *self.ticket.borrow_mut() = None;
    }

    pub fn reset_counts(&self) {
        self.applicant_calls.set(0);
        self.appointment_calls.set(0);
        self.vehicle_calls.set(0);
        self.disc_calls.set(0);
        self.payment_calls.set(0);
    }

    fn take_failure(&self) -> Option<AppError> {
        self.fail_next.borrow_mut().take().map(|message| AppError::gateway(message, Some(500)))
    }
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl LicensingGateway for RecordingGateway {
    fn create_applicant(&self, applicant: &NewApplicant) -> Result<Applicant, AppError> {
        self.applicant_calls.set(self.applicant_calls.get() + 1);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(Applicant {
            id: 1,
            first_name: applicant.first_name.clone(),
            last_name: applicant.last_name.clone(),
            id_number: applicant.id_number.clone(),
            birth_date: applicant.birth_date,
            contact: applicant.contact.clone(),
            address: applicant.address.clone(),
            status: ApplicantStatus::Pending,
            reason: None,
        })
    }

    fn login(
        &self,
        email: &str,
        _password: &str,
        role: LoginRole,
    ) -> Result<AuthenticatedUser, AppError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(AuthenticatedUser {
            user_id: 41,
            first_name: "Thandi".to_string(),
            last_name: "Ngcobo".to_string(),
            email: email.to_string(),
            role,
        })
    }

    fn register_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError> {
        self.vehicle_calls.set(self.vehicle_calls.get() + 1);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let owner_id = vehicle.owner_id.ok_or(AppError::NotAuthenticated)?;
        Ok(Vehicle {
            id: 77,
            name: vehicle.name.clone(),
            vehicle_type: vehicle.vehicle_type,
            model: vehicle.model.clone(),
            year: vehicle.year,
            color: vehicle.color.clone(),
            engine_number: vehicle.engine_number.clone(),
            chassis_number: vehicle.chassis_number.clone(),
            license_plate: vehicle.license_plate.clone(),
            owner_id,
            disc: None,
        })
    }

    fn create_vehicle_disc(&self, order: &DiscOrder) -> Result<VehicleDisc, AppError> {
        self.disc_calls.set(self.disc_calls.get() + 1);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(VehicleDisc {
            disc_id: order.disc_id.unwrap_or(601),
            issue_date: order.issue_date,
            expiry_date: order.expiry_date,
            registration_fee: order.registration_fee,
            status: DiscStatus::Active,
        })
    }

    fn create_payment(&self, order: &PaymentOrder) -> Result<Payment, AppError> {
        self.payment_calls.set(self.payment_calls.get() + 1);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(Payment {
            payment_id: 3001,
            payment_type: order.payment_type,
            method: order.method,
            amount: order.amount,
            date: order.date,
        })
    }

    fn create_test_appointment(
        &self,
        order: &AppointmentOrder,
    ) -> Result<TestAppointment, AppError> {
        self.appointment_calls.set(self.appointment_calls.get() + 1);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(TestAppointment {
            appointment_id: 900,
            applicant_id: order.applicant_id,
            test_type: order.test_type,
            venue: order.venue.clone(),
            address: order.address.clone(),
            date: order.date,
            time: order.time.clone(),
            license_code: order.license_code.clone(),
            fee: order.fee,
            result: None,
        })
    }

    fn bookings_for_applicant(&self, _applicant_id: u64) -> Result<Vec<TestAppointment>, AppError> {
        Ok(Vec::new())
    }

    fn vehicles_for_applicant(&self, _applicant_id: u64) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.expired.borrow().clone())
    }

    fn expired_vehicles(&self) -> Result<Vec<Vehicle>, AppError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.expired.borrow().clone())
    }

    fn find_ticket(&self, ticket_number: &str) -> Result<TrafficTicket, AppError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        self.ticket
            .borrow()
            .clone()
            .filter(|ticket| ticket.ticket_number == ticket_number)
            .ok_or_else(|| AppError::TicketNotFound(ticket_number.to_string()))
    }

    fn delete_entity(&self, _kind: EntityKind, _id: u64) -> Result<(), AppError> {
        Ok(())
    }

    fn update_applicant_status(
        &self,
        _id: u64,
        _status: ApplicantStatus,
        _reason: Option<&str>,
    ) -> Result<(), AppError> {
        Ok(())
    }
}
