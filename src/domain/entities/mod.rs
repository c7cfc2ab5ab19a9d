//! Domain entities exchanged with the licensing backend.
//!
//! One schema per entity; field-name normalization for the backend's looser
//! shapes happens once, inside the HTTP gateway adapter.

mod applicant;
mod appointment;
mod disc;
mod payment;
mod ticket;
mod vehicle;

pub use applicant::{
    Address, Applicant, ApplicantStatus, AuthenticatedUser, Contact, LoginRole, NewApplicant,
};
pub use appointment::{AppointmentOrder, TestAppointment, TestType};
pub use disc::{DiscOrder, DiscStatus, VehicleDisc, disc_validity, one_year_after};
pub use payment::{CardDetails, Payment, PaymentMethod, PaymentOrder, PaymentType};
pub use ticket::{TicketStatus, TrafficTicket};
pub use vehicle::{EntityKind, NewVehicle, Vehicle, VehicleType};
