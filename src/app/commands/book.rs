//! `book` command: drive the test booking wizard end to end.

use chrono::Local;

use crate::app::AppContext;
use crate::app::commands::prompts::{
    Credentials, PaymentInput, parse_date, required_input, select_item,
};
use crate::domain::entities::{LoginRole, TestType};
use crate::domain::{AppError, catalog};
use crate::ports::LicensingGateway;
use crate::services::BookingWizard;

#[derive(Debug, Clone)]
pub struct BookOptions {
    pub test_type: String,
    pub credentials: Credentials,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub license_code: Option<String>,
    pub notes: Option<String>,
    pub payment: PaymentInput,
}

pub fn execute<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    options: BookOptions,
) -> Result<(), AppError> {
    let test_type: TestType = options.test_type.parse().map_err(AppError::Configuration)?;

    let (email, password) = options.credentials.resolve()?;
    let session = ctx.login(&email, &password, LoginRole::Applicant)?.clone();

    let mut wizard = BookingWizard::new(&session, test_type);
    println!("{} - fee R {}", test_type.title(), wizard.fee());

    let venue = match options.venue {
        Some(venue) => venue,
        None => {
            let names: Vec<&str> = catalog::VENUES.iter().map(|venue| venue.name).collect();
            select_item("Testing venue", &names)?
        }
    };
    wizard.select_venue(&venue)?;
    println!("Venue address: {}", wizard.details().address);

    {
        let date = parse_date(&required_input(options.date, "Test date (YYYY-MM-DD)")?)?;
        let time = match options.time {
            Some(time) => time,
            None => select_item("Test time", &catalog::TIME_SLOTS)?,
        };
        let license_code = required_input(options.license_code, "License code")?;

        let details = wizard.details_mut();
        details.date = Some(date);
        details.time = time;
        details.license_code = license_code;
        details.notes = options.notes.unwrap_or_default();
    }
    wizard.continue_to_payment()?;

    options.payment.apply(wizard.payment_mut())?;

    wizard.submit(ctx.gateway(), Local::now().date_naive())?;

    let confirmation = wizard.confirmation().ok_or(AppError::InvalidTransition)?.clone();
    let appointment = &confirmation.appointment;
    println!("✅ Booking confirmed! Reference {}", confirmation.reference);
    println!(
        "   {} on {} at {}, {} ({})",
        test_type.title(),
        appointment.date,
        appointment.time,
        appointment.venue,
        appointment.address
    );
    println!("   Fee paid: R {}", appointment.fee);

    ctx.remember_booking(confirmation);
    Ok(())
}
