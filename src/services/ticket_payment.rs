//! Traffic-ticket payment wizard.
//!
//! Find the ticket by number, review it (with an overdue warning when the
//! due date has passed), pay, confirm.

use chrono::NaiveDate;

use crate::domain::AppError;
use crate::domain::entities::{Payment, PaymentOrder, PaymentType, TrafficTicket};
use crate::domain::validation::{self, ValidationError};
use crate::ports::LicensingGateway;
use crate::services::PaymentForm;

/// Inputs for the lookup step.
#[derive(Debug, Clone, Default)]
pub struct TicketSearch {
    pub ticket_number: String,
    /// Checked against the ticket for verification; not sent to the backend.
    pub license_number: String,
}

/// Observable step of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStep {
    FindingTicket,
    ReviewingPayment,
    Submitting,
    Confirmed,
}

#[derive(Debug, Clone)]
pub struct TicketConfirmation {
    /// `TT`-prefixed reference derived from the recorded payment.
    pub reference: String,
    pub ticket: TrafficTicket,
    pub payment: Payment,
}

#[derive(Debug)]
enum State {
    FindingTicket,
    ReviewingPayment,
    Submitting,
    Confirmed(TicketConfirmation),
}

#[derive(Debug)]
pub struct TicketPaymentWizard {
    search: TicketSearch,
    ticket: Option<TrafficTicket>,
    payment: PaymentForm,
    state: State,
    error: Option<String>,
    abandoned: bool,
}

impl Default for TicketPaymentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketPaymentWizard {
    pub fn new() -> Self {
        Self {
            search: TicketSearch::default(),
            ticket: None,
            payment: PaymentForm::default(),
            state: State::FindingTicket,
            error: None,
            abandoned: false,
        }
    }

    pub fn search_mut(&mut self) -> &mut TicketSearch {
        &mut self.search
    }

    pub fn payment_mut(&mut self) -> &mut PaymentForm {
        &mut self.payment
    }

    pub fn step(&self) -> TicketStep {
        match self.state {
            State::FindingTicket => TicketStep::FindingTicket,
            State::ReviewingPayment => TicketStep::ReviewingPayment,
            State::Submitting => TicketStep::Submitting,
            State::Confirmed(_) => TicketStep::Confirmed,
        }
    }

    pub fn ticket(&self) -> Option<&TrafficTicket> {
        self.ticket.as_ref()
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn confirmation(&self) -> Option<&TicketConfirmation> {
        match &self.state {
            State::Confirmed(confirmation) => Some(confirmation),
            _ => None,
        }
    }

    /// True once a ticket is loaded and its due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.ticket.as_ref().is_some_and(|ticket| ticket.is_overdue(today))
    }

    /// Look the ticket up and move to the payment step. Ticket numbers are
    /// matched upper-case, the way they are printed on the notice.
    pub fn find<G: LicensingGateway>(&mut self, gateway: &G) -> Result<&TrafficTicket, AppError> {
        if !matches!(self.state, State::FindingTicket) {
            return Err(AppError::InvalidTransition);
        }

        validation::require_fields(&[
            ("ticket number", &self.search.ticket_number),
            ("license number", &self.search.license_number),
        ])?;

        let number = self.search.ticket_number.trim().to_uppercase();
        match gateway.find_ticket(&number) {
            Ok(ticket) => {
                self.error = None;
                self.state = State::ReviewingPayment;
                Ok(self.ticket.insert(ticket))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn back_to_search(&mut self) -> Result<(), AppError> {
        if !matches!(self.state, State::ReviewingPayment) {
            return Err(AppError::InvalidTransition);
        }
        self.state = State::FindingTicket;
        Ok(())
    }

    /// Validate payment and enter `Submitting`; the payload amount is the
    /// ticket's fine.
    pub fn start_submit(&mut self, today: NaiveDate) -> Result<PaymentOrder, AppError> {
        match self.state {
            State::ReviewingPayment => {}
            State::Submitting => return Err(AppError::SubmissionInFlight),
            _ => return Err(AppError::InvalidTransition),
        }

        let ticket = self.ticket.as_ref().ok_or(AppError::InvalidTransition)?;
        let order = self.payment.to_order(PaymentType::Ticket, ticket.amount, today)?;

        self.error = None;
        self.state = State::Submitting;
        Ok(order)
    }

    /// Apply the gateway outcome; failure returns to the payment step.
    pub fn finish_submit(&mut self, outcome: Result<Payment, AppError>) -> Result<(), AppError> {
        if self.abandoned {
            return Ok(());
        }
        if !matches!(self.state, State::Submitting) {
            return Err(AppError::InvalidTransition);
        }

        match outcome {
            Ok(payment) => {
                let ticket = self.ticket.clone().ok_or(AppError::InvalidTransition)?;
                let confirmation = TicketConfirmation {
                    reference: format!("TT-{}", payment.payment_id),
                    ticket,
                    payment,
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

    pub fn abandon(&mut self) {
        self.abandoned = true;
    }

    /// Drive one full payment against the gateway.
    pub fn submit<G: LicensingGateway>(
        &mut self,
        gateway: &G,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        let order = self.start_submit(today)?;
        let outcome = gateway.create_payment(&order);
        self.finish_submit(outcome)
    }
}
