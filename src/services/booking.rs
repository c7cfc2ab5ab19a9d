//! Test booking wizard.
//!
//! Two phases: test details (date, slot, venue, license code), then payment.
//! One combined appointment-plus-payment payload goes to the gateway exactly
//! once per accepted submit.

use chrono::NaiveDate;

use crate::domain::entities::{AppointmentOrder, PaymentType, TestAppointment, TestType};
use crate::domain::validation::{self, ValidationError};
use crate::domain::{AppError, Session, catalog};
use crate::ports::LicensingGateway;
use crate::services::PaymentForm;

/// Details collected in the first phase.
#[derive(Debug, Clone, Default)]
pub struct BookingDetails {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub venue: String,
    /// Bound to the venue via the venue table; never typed by the user.
    pub address: String,
    pub license_code: String,
    pub notes: String,
}

/// Observable step of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    SelectingDetails,
    ReviewingPayment,
    Submitting,
    Confirmed,
}

/// What the confirmation screen shows.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    /// Human-readable reference derived from the backend id.
    pub reference: String,
    pub appointment: TestAppointment,
}

#[derive(Debug)]
enum State {
    SelectingDetails,
    ReviewingPayment,
    Submitting,
    Confirmed(BookingConfirmation),
}

/// The booking state machine.
///
/// A failed submission lands back in `ReviewingPayment` (not
/// `SelectingDetails`) with the gateway's message as a banner, so selections
/// survive a retry; card number and CVV are cleared.
#[derive(Debug)]
pub struct BookingWizard {
    applicant_id: u64,
    test_type: TestType,
    details: BookingDetails,
    payment: PaymentForm,
    state: State,
    error: Option<String>,
    abandoned: bool,
}

impl BookingWizard {
    pub fn new(session: &Session, test_type: TestType) -> Self {
        Self {
            applicant_id: session.user_id,
            test_type,
            details: BookingDetails::default(),
            payment: PaymentForm::default(),
            state: State::SelectingDetails,
            error: None,
            abandoned: false,
        }
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    /// Fee owed for the selected test, from the fixed fee table.
    pub fn fee(&self) -> u32 {
        catalog::test_fee(self.test_type)
    }

    pub fn step(&self) -> BookingStep {
        match self.state {
            State::SelectingDetails => BookingStep::SelectingDetails,
            State::ReviewingPayment => BookingStep::ReviewingPayment,
            State::Submitting => BookingStep::Submitting,
            State::Confirmed(_) => BookingStep::Confirmed,
        }
    }

    pub fn details(&self) -> &BookingDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut BookingDetails {
        &mut self.details
    }

    pub fn payment_mut(&mut self) -> &mut PaymentForm {
        &mut self.payment
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match &self.state {
            State::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Choosing a venue fills its bound address; unknown names are refused.
    pub fn select_venue(&mut self, name: &str) -> Result<(), ValidationError> {
        let address =
            catalog::venue_address(name).ok_or_else(|| ValidationError::UnknownVenue(name.to_string()))?;
        self.details.venue = name.to_string();
        self.details.address = address.to_string();
        Ok(())
    }

    /// Gate between the two phases: date, slot, venue and license code must
    /// all be present, and the slot must come from the fixed set.
    pub fn continue_to_payment(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, State::SelectingDetails) {
            return Err(AppError::InvalidTransition);
        }

        let details = &self.details;
        if details.date.is_none() {
            return Err(ValidationError::MissingField("test date").into());
        }
        require_detail_fields(details)?;
        if !catalog::is_time_slot(&details.time) {
            return Err(ValidationError::InvalidTimeSlot(details.time.clone()).into());
        }

        self.state = State::ReviewingPayment;
        Ok(())
    }

    /// Back-navigation before submission; entered data is kept.
    pub fn back_to_details(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, State::ReviewingPayment) {
            return Err(AppError::InvalidTransition);
        }
        self.state = State::SelectingDetails;
        Ok(())
    }

    /// Validate the payment step and enter `Submitting`, handing back the
    /// combined payload for the single gateway call. Rejected while a
    /// submission is already in flight.
    pub fn start_submit(&mut self, today: NaiveDate) -> Result<AppointmentOrder, AppError> {
        match self.state {
            State::ReviewingPayment => {}
            State::Submitting => return Err(AppError::SubmissionInFlight),
            _ => return Err(AppError::InvalidTransition),
        }

        let fee = self.fee();
        let payment = self.payment.to_order(PaymentType::TestBooking, fee, today)?;
        let date = self.details.date.ok_or(ValidationError::MissingField("test date"))?;

        let order = AppointmentOrder {
            applicant_id: self.applicant_id,
            test_type: self.test_type,
            venue: self.details.venue.clone(),
            address: self.details.address.clone(),
            date,
            time: self.details.time.clone(),
            license_code: self.details.license_code.clone(),
            notes: self.details.notes.clone(),
            fee,
            payment,
        };

        self.error = None;
        self.state = State::Submitting;
        Ok(order)
    }

    /// Apply the gateway outcome. A wizard abandoned mid-flight discards the
    /// outcome; a failure returns to the payment step with the message shown
    /// verbatim and card secrets dropped.
    pub fn finish_submit(
        &mut self,
        outcome: Result<TestAppointment, AppError>,
    ) -> Result<(), AppError> {
        if self.abandoned {
            return Ok(());
        }
        if !matches!(self.state, State::Submitting) {
            return Err(AppError::InvalidTransition);
        }

        match outcome {
            Ok(appointment) => {
                let confirmation = BookingConfirmation {
                    reference: format!("BK-{}", appointment.appointment_id),
                    appointment,
                };
                self.state = State::Confirmed(confirmation);
                Ok(())
            }
            Err(err) => {
                self.payment.clear_secrets();
                self.error = Some(err.to_string());
                self.state = State::ReviewingPayment;
                Err(err)
            }
        }
    }

    /// Mark the wizard as navigated-away; late outcomes are discarded.
    pub fn abandon(&mut self) {
        self.abandoned = true;
    }

    /// Drive one full submission against the gateway.
    pub fn submit<G: LicensingGateway>(
        &mut self,
        gateway: &G,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        let order = self.start_submit(today)?;
        let outcome = gateway.create_test_appointment(&order);
        self.finish_submit(outcome)
    }
}

fn require_detail_fields(details: &BookingDetails) -> Result<(), ValidationError> {
    validation::require_fields(&[
        ("test time", &details.time),
        ("testing venue", &details.venue),
        ("license code", &details.license_code),
    ])
}
