mod booking;
mod disc_renewal;
mod gateway_http;
mod payment_form;
mod registration;
mod ticket_payment;
mod vehicle_registration;

pub use booking::{BookingConfirmation, BookingDetails, BookingStep, BookingWizard};
pub use disc_renewal::{DiscRenewalWizard, RenewalConfirmation, RenewalStep};
pub use gateway_http::HttpGateway;
pub use payment_form::PaymentForm;
pub use registration::{RegistrationForm, RegistrationStep, RegistrationWizard};
pub use ticket_payment::{TicketConfirmation, TicketPaymentWizard, TicketSearch, TicketStep};
pub use vehicle_registration::{
    VehicleConfirmation, VehicleForm, VehicleRegistrationWizard, VehicleStep, VehicleSubmission,
};
