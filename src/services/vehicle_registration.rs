//! Vehicle registration wizard.
//!
//! Same two-phase shape as the booking flow: vehicle attributes, then
//! payment. Submission registers the vehicle and issues its disc, with the
//! disc validity computed from the model year.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::domain::entities::{
    DiscOrder, NewVehicle, PaymentOrder, PaymentType, Vehicle, VehicleDisc, VehicleType,
    disc_validity,
};
use crate::domain::validation::{self, ValidationError};
use crate::domain::{AppError, Session, catalog};
use crate::ports::LicensingGateway;
use crate::services::PaymentForm;

/// Vehicle attributes collected in the first phase.
#[derive(Debug, Clone, Default)]
pub struct VehicleForm {
    /// Make, e.g. "Toyota".
    pub name: String,
    pub vehicle_type: Option<VehicleType>,
    pub model: String,
    pub year: Option<i32>,
    pub color: String,
    pub engine_number: String,
    pub chassis_number: String,
    /// Optional plate preference; at most 7 characters, stored upper-cased.
    pub license_plate: String,
}

/// Observable step of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStep {
    EnteringVehicle,
    ReviewingPayment,
    Submitting,
    Confirmed,
}

#[derive(Debug, Clone)]
pub struct VehicleConfirmation {
    pub vehicle: Vehicle,
    pub disc: VehicleDisc,
}

/// Payloads for the two backend calls one submission performs.
#[derive(Debug, Clone)]
pub struct VehicleSubmission {
    pub vehicle: NewVehicle,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub payment: PaymentOrder,
}

#[derive(Debug)]
enum State {
    EnteringVehicle,
    ReviewingPayment,
    Submitting,
    Confirmed(VehicleConfirmation),
}

#[derive(Debug)]
pub struct VehicleRegistrationWizard {
    owner_id: u64,
    form: VehicleForm,
    payment: PaymentForm,
    state: State,
    error: Option<String>,
    abandoned: bool,
}

impl VehicleRegistrationWizard {
    pub fn new(session: &Session) -> Self {
        Self {
            owner_id: session.user_id,
            form: VehicleForm::default(),
            payment: PaymentForm::default(),
            state: State::EnteringVehicle,
            error: None,
            abandoned: false,
        }
    }

    /// Flat registration fee, disc included.
    pub fn fee(&self) -> u32 {
        catalog::VEHICLE_REGISTRATION_FEE
    }

    pub fn step(&self) -> VehicleStep {
        match self.state {
            State::EnteringVehicle => VehicleStep::EnteringVehicle,
            State::ReviewingPayment => VehicleStep::ReviewingPayment,
            State::Submitting => VehicleStep::Submitting,
            State::Confirmed(_) => VehicleStep::Confirmed,
        }
    }

    pub fn form_mut(&mut self) -> &mut VehicleForm {
        &mut self.form
    }

    pub fn payment_mut(&mut self) -> &mut PaymentForm {
        &mut self.payment
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&VehicleConfirmation> {
        match &self.state {
            State::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Gate between phases: every attribute except the plate is required,
    /// the year must be plausible, and a plate preference is normalized.
    pub fn continue_to_payment(&mut self, today: NaiveDate) -> Result<(), AppError> {
        if !matches!(self.state, State::EnteringVehicle) {
            return Err(AppError::InvalidTransition);
        }

        let form = &self.form;
        validation::require_fields(&[
            ("make", &form.name),
            ("model", &form.model),
            ("color", &form.color),
            ("engine number", &form.engine_number),
            ("chassis number", &form.chassis_number),
        ])?;
        if form.vehicle_type.is_none() {
            return Err(ValidationError::MissingField("vehicle type").into());
        }
        let year = match form.year {
            Some(year) => year,
            None => return Err(ValidationError::MissingField("year").into()),
        };
        if !(1900..=today.year() + 1).contains(&year) {
            return Err(ValidationError::InvalidVehicleYear(year).into());
        }

        let plate = form.license_plate.trim().to_string();
        if plate.chars().count() > 7 {
            return Err(ValidationError::InvalidLicensePlate.into());
        }
        self.form.license_plate = plate.to_uppercase();

        self.state = State::ReviewingPayment;
        Ok(())
    }

    pub fn back_to_vehicle(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, State::ReviewingPayment) {
            return Err(AppError::InvalidTransition);
        }
        self.state = State::EnteringVehicle;
        Ok(())
    }

    /// Validate the payment step and enter `Submitting`. The disc dates are
    /// fixed here: issue is now, expiry follows the model-year bands.
    pub fn start_submit(&mut self, now: DateTime<Utc>) -> Result<VehicleSubmission, AppError> {
        match self.state {
            State::ReviewingPayment => {}
            State::Submitting => return Err(AppError::SubmissionInFlight),
            _ => return Err(AppError::InvalidTransition),
        }

        let form = &self.form;
        let vehicle_type =
            form.vehicle_type.ok_or(ValidationError::MissingField("vehicle type"))?;
        let year = form.year.ok_or(ValidationError::MissingField("year"))?;

        let today = now.date_naive();
        let payment = self.payment.to_order(PaymentType::VehicleDisc, self.fee(), today)?;

        let plate = form.license_plate.trim();
        let submission = VehicleSubmission {
            vehicle: NewVehicle {
                name: form.name.trim().to_string(),
                vehicle_type,
                model: form.model.trim().to_string(),
                year,
                color: form.color.trim().to_string(),
                engine_number: form.engine_number.trim().to_string(),
                chassis_number: form.chassis_number.trim().to_string(),
                license_plate: (!plate.is_empty()).then(|| plate.to_string()),
                owner_id: Some(self.owner_id),
            },
            issue_date: now,
            expiry_date: disc_validity(year, now),
            payment,
        };

        self.error = None;
        self.state = State::Submitting;
        Ok(submission)
    }

    /// Apply the combined outcome of the register-vehicle and create-disc
    /// calls. Failure returns to the payment step with secrets cleared.
    pub fn finish_submit(
        &mut self,
        outcome: Result<(Vehicle, VehicleDisc), AppError>,
    ) -> Result<(), AppError> {
        if self.abandoned {
            return Ok(());
        }
        if !matches!(self.state, State::Submitting) {
            return Err(AppError::InvalidTransition);
        }

        match outcome {
            Ok((vehicle, disc)) => {
                self.state = State::Confirmed(VehicleConfirmation { vehicle, disc });
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

    pub fn abandon(&mut self) {
        self.abandoned = true;
    }

    /// Drive one full submission: register the vehicle, then issue its disc
    /// with the nested payment.
    pub fn submit<G: LicensingGateway>(
        &mut self,
        gateway: &G,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let submission = self.start_submit(now)?;
        let outcome = perform(gateway, submission);
        self.finish_submit(outcome)
    }
}

fn perform<G: LicensingGateway>(
    gateway: &G,
    submission: VehicleSubmission,
) -> Result<(Vehicle, VehicleDisc), AppError> {
    let vehicle = gateway.register_vehicle(&submission.vehicle)?;
    let disc = gateway.create_vehicle_disc(&DiscOrder {
        disc_id: None,
        vehicle_id: vehicle.id,
        issue_date: submission.issue_date,
        expiry_date: submission.expiry_date,
        registration_fee: submission.payment.amount,
        payment: submission.payment,
    })?;
    Ok((vehicle, disc))
}
