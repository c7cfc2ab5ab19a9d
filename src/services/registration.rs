//! Applicant registration wizard.

use chrono::NaiveDate;

use crate::domain::AppError;
use crate::domain::entities::{Address, Applicant, Contact, LoginRole, NewApplicant};
use crate::domain::validation::{self, ValidationError};
use crate::ports::LicensingGateway;

/// Everything the registration screen collects.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub email: String,
    pub cellphone: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub birth_date: Option<NaiveDate>,
    pub password: String,
    pub confirm_password: String,
}

/// Observable step of the registration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Collecting,
    Submitting,
    Registered,
}

#[derive(Debug)]
enum State {
    Collecting,
    Submitting,
    Registered(Applicant),
}

/// Collect identity/contact/address/credentials, validate, submit once.
///
/// A failed submission returns to `Collecting` with the gateway's message
/// attached so the user can correct input and retry; nothing retries on its
/// own.
#[derive(Debug)]
pub struct RegistrationWizard {
    form: RegistrationForm,
    state: State,
    error: Option<String>,
    abandoned: bool,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::default(),
            state: State::Collecting,
            error: None,
            abandoned: false,
        }
    }

    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    pub fn step(&self) -> RegistrationStep {
        match self.state {
            State::Collecting => RegistrationStep::Collecting,
            State::Submitting => RegistrationStep::Submitting,
            State::Registered(_) => RegistrationStep::Registered,
        }
    }

    /// Form-level banner from the last failed submission.
    pub fn error_banner(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The created applicant, once registered.
    pub fn applicant(&self) -> Option<&Applicant> {
        match &self.state {
            State::Registered(applicant) => Some(applicant),
            _ => None,
        }
    }

    /// Mark the wizard as navigated-away. Any outcome that arrives later is
    /// discarded instead of mutating state nobody is looking at.
    pub fn abandon(&mut self) {
        self.abandoned = true;
    }

    /// Run the validation gate in the order the form applies it.
    fn validate(&self, today: NaiveDate) -> Result<NewApplicant, ValidationError> {
        let form = &self.form;

        validation::require_fields(&[
            ("first name", &form.first_name),
            ("last name", &form.last_name),
            ("ID number", &form.id_number),
            ("email", &form.email),
            ("contact number", &form.cellphone),
            ("street", &form.street),
            ("city", &form.city),
            ("province", &form.province),
            ("country", &form.country),
            ("password", &form.password),
            ("confirm password", &form.confirm_password),
        ])?;

        if !validation::is_valid_id_number(&form.id_number) {
            return Err(ValidationError::InvalidIdFormat);
        }
        let birth_date = form.birth_date.ok_or(ValidationError::MissingField("date of birth"))?;
        validation::birth_date_matches_id(&form.id_number, birth_date, today)?;

        validation::check_password_strength(&form.password)?;
        validation::passwords_match(&form.password, &form.confirm_password)?;

        if !validation::is_adult(birth_date, today) {
            return Err(ValidationError::Underage);
        }

        Ok(NewApplicant {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            id_number: form.id_number.clone(),
            birth_date,
            password: form.password.trim().to_string(),
            role: LoginRole::Applicant,
            contact: Contact {
                email: form.email.trim().to_string(),
                cellphone: form.cellphone.trim().to_string(),
            },
            address: Address {
                street: form.street.trim().to_string(),
                city: form.city.trim().to_string(),
                province: form.province.trim().to_string(),
                country: form.country.trim().to_string(),
            },
        })
    }

    /// Validate and enter `Submitting`, handing back the payload for the one
    /// gateway call. Rejected while a submission is in flight.
    pub fn start_submit(&mut self, today: NaiveDate) -> Result<NewApplicant, AppError> {
        match self.state {
            State::Collecting => {}
            State::Submitting => return Err(AppError::SubmissionInFlight),
            State::Registered(_) => return Err(AppError::InvalidTransition),
        }

        let payload = self.validate(today)?;
        self.error = None;
        self.state = State::Submitting;
        Ok(payload)
    }

    /// Apply the gateway outcome. Discarded entirely when the wizard was
    /// abandoned while the call was in flight.
    pub fn finish_submit(&mut self, outcome: Result<Applicant, AppError>) -> Result<(), AppError> {
        if self.abandoned {
            return Ok(());
        }
        if !matches!(self.state, State::Submitting) {
            return Err(AppError::InvalidTransition);
        }

        match outcome {
            Ok(applicant) => {
                self.state = State::Registered(applicant);
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.state = State::Collecting;
                Err(err)
            }
        }
    }

    /// Drive one full submission against the gateway.
    pub fn submit<G: LicensingGateway>(
        &mut self,
        gateway: &G,
        today: NaiveDate,
    ) -> Result<(), AppError> {
        let payload = self.start_submit(today)?;
        let outcome = gateway.create_applicant(&payload);
        self.finish_submit(outcome)
    }
}
