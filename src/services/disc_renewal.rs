//! Disc renewal wizard.
//!
//! Lists vehicles whose disc has lapsed, then runs the payment-only step.
//! A successful renewal pushes the disc forward exactly one year from today
//! through a single gateway call.

use chrono::{DateTime, Utc};

use crate::domain::entities::{DiscOrder, PaymentType, Vehicle, VehicleDisc, one_year_after};
use crate::domain::{AppError, Session, catalog};
use crate::ports::LicensingGateway;
use crate::services::PaymentForm;

/// Observable step of the renewal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalStep {
    SelectingVehicle,
    ReviewingPayment,
    Submitting,
    Confirmed,
}

#[derive(Debug, Clone)]
pub struct RenewalConfirmation {
    pub vehicle: Vehicle,
    pub disc: VehicleDisc,
}

#[derive(Debug)]
enum State {
    SelectingVehicle,
    ReviewingPayment,
    Submitting,
    Confirmed(RenewalConfirmation),
}

#[derive(Debug)]
pub struct DiscRenewalWizard {
    vehicles: Vec<Vehicle>,
    selected: Option<usize>,
    payment: PaymentForm,
    state: State,
    error: Option<String>,
    abandoned: bool,
}

impl DiscRenewalWizard {
    /// Fetch the renewal candidates and keep only those whose disc really is
    /// past its expiry at `now`; the client-side cutoff is authoritative for
    /// what the list shows.
    pub fn load<G: LicensingGateway>(
        gateway: &G,
        _session: &Session,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let vehicles = gateway
            .expired_vehicles()?
            .into_iter()
            .filter(|vehicle| vehicle.disc.as_ref().is_some_and(|disc| disc.expiry_date < now))
            .collect();

        Ok(Self {
            vehicles,
            selected: None,
            payment: PaymentForm::default(),
            state: State::SelectingVehicle,
            error: None,
            abandoned: false,
        })
    }

    /// Renewal fee, same flat amount as registration.
    pub fn fee(&self) -> u32 {
        catalog::VEHICLE_REGISTRATION_FEE
    }

    pub fn step(&self) -> RenewalStep {
        match self.state {
            State::SelectingVehicle => RenewalStep::SelectingVehicle,
            State::ReviewingPayment => RenewalStep::ReviewingPayment,
            State::Submitting => RenewalStep::Submitting,
            State::Confirmed(_) => RenewalStep::Confirmed,
        }
    }

    /// Vehicles still awaiting renewal.
    pub fn expired(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected.and_then(|index| self.vehicles.get(index))
    }

    pub fn payment_mut(&mut self) -> &mut PaymentForm {
        &mut self.payment
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&RenewalConfirmation> {
        match &self.state {
            State::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// Pick a vehicle from the expired list and move to payment.
    pub fn select(&mut self, index: usize) -> Result<(), AppError> {
        if !matches!(self.state, State::SelectingVehicle) {
            return Err(AppError::InvalidTransition);
        }
        if index >= self.vehicles.len() {
            return Err(AppError::InvalidTransition);
        }

        self.selected = Some(index);
        self.error = None;
        self.state = State::ReviewingPayment;
        Ok(())
    }

    pub fn back_to_selection(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, State::ReviewingPayment) {
            return Err(AppError::InvalidTransition);
        }
        self.state = State::SelectingVehicle;
        Ok(())
    }

    /// Validate payment and enter `Submitting`. The renewed disc runs from
    /// today to exactly one year later.
    pub fn start_submit(&mut self, now: DateTime<Utc>) -> Result<DiscOrder, AppError> {
        match self.state {
            State::ReviewingPayment => {}
            State::Submitting => return Err(AppError::SubmissionInFlight),
            _ => return Err(AppError::InvalidTransition),
        }

        let vehicle = self
            .selected
            .and_then(|index| self.vehicles.get(index))
            .ok_or(AppError::InvalidTransition)?;
        let disc = vehicle.disc.as_ref().ok_or(AppError::InvalidTransition)?;

        let fee = self.fee();
        let payment = self.payment.to_order(PaymentType::VehicleDisc, fee, now.date_naive())?;

        let order = DiscOrder {
            disc_id: Some(disc.disc_id),
            vehicle_id: vehicle.id,
            issue_date: now,
            expiry_date: one_year_after(now),
            registration_fee: fee,
            payment,
        };

        self.error = None;
        self.state = State::Submitting;
        Ok(order)
    }

    /// Apply the gateway outcome. Success removes the vehicle from the
    /// expired list; failure returns to payment with secrets cleared.
    pub fn finish_submit(&mut self, outcome: Result<VehicleDisc, AppError>) -> Result<(), AppError> {
        if self.abandoned {
            return Ok(());
        }
        if !matches!(self.state, State::Submitting) {
            return Err(AppError::InvalidTransition);
        }

        match outcome {
            Ok(disc) => {
                let index = self.selected.take().ok_or(AppError::InvalidTransition)?;
                let vehicle = self.vehicles.remove(index);
                self.state = State::Confirmed(RenewalConfirmation { vehicle, disc });
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

    /// Drive one full renewal against the gateway.
    pub fn submit<G: LicensingGateway>(
        &mut self,
        gateway: &G,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let order = self.start_submit(now)?;
        let outcome = gateway.create_vehicle_disc(&order);
        self.finish_submit(outcome)
    }
}
