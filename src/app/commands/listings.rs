//! `bookings` and `vehicles` commands: per-applicant listings.

use crate::app::AppContext;
use crate::app::commands::prompts::Credentials;
use crate::domain::AppError;
use crate::domain::entities::LoginRole;
use crate::ports::LicensingGateway;

pub fn bookings<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    credentials: Credentials,
) -> Result<(), AppError> {
    let (email, password) = credentials.resolve()?;
    let session = ctx.login(&email, &password, LoginRole::Applicant)?.clone();

    let bookings = ctx.gateway().bookings_for_applicant(session.user_id)?;
    if bookings.is_empty() {
        println!("No bookings yet.");
        return Ok(());
    }

    for booking in &bookings {
        let outcome = match booking.result {
            None => "pending",
            Some(true) => "passed",
            Some(false) => "failed",
        };
        println!(
            "BK-{}  {}  {} {}  {}  R {}  [{}]",
            booking.appointment_id,
            booking.test_type.as_str(),
            booking.date,
            booking.time,
            booking.venue,
            booking.fee,
            outcome
        );
    }
    Ok(())
}

pub fn vehicles<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    credentials: Credentials,
) -> Result<(), AppError> {
    let (email, password) = credentials.resolve()?;
    let session = ctx.login(&email, &password, LoginRole::Applicant)?.clone();

    let vehicles = ctx.gateway().vehicles_for_applicant(session.user_id)?;
    if vehicles.is_empty() {
        println!("No registered vehicles.");
        return Ok(());
    }

    for vehicle in &vehicles {
        let plate = vehicle.license_plate.as_deref().unwrap_or("no plate");
        let disc = match &vehicle.disc {
            Some(disc) => format!("disc until {}", disc.expiry_date.format("%Y-%m-%d")),
            None => "no disc".to_string(),
        };
        println!(
            "#{}  {} {} ({})  {}  {}",
            vehicle.id, vehicle.name, vehicle.model, vehicle.year, plate, disc
        );
    }
    Ok(())
}
