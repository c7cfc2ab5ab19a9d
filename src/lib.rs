//! automate: client for the AutoMate vehicle-licensing backend.
//!
//! Wraps the backend's REST API in a typed gateway and drives the
//! registration, test-booking, vehicle, disc-renewal and ticket-payment
//! flows as explicit state machines with client-side validation gates.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use domain::{AppError, GatewayConfig, Session, ValidationError};
pub use ports::LicensingGateway;
pub use services::{
    BookingWizard, DiscRenewalWizard, HttpGateway, RegistrationWizard, TicketPaymentWizard,
    VehicleRegistrationWizard,
};
