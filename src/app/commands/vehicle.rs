//! `register-vehicle` command: drive the vehicle registration wizard.

use chrono::{Local, Utc};

use crate::app::AppContext;
use crate::app::commands::prompts::{Credentials, PaymentInput, required_input, select_item};
use crate::domain::AppError;
use crate::domain::entities::{LoginRole, VehicleType};
use crate::ports::LicensingGateway;
use crate::services::VehicleRegistrationWizard;

#[derive(Debug, Clone)]
pub struct VehicleOptions {
    pub credentials: Credentials,
    pub make: Option<String>,
    pub vehicle_type: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub engine_number: Option<String>,
    pub chassis_number: Option<String>,
    pub plate: Option<String>,
    pub payment: PaymentInput,
}

pub fn execute<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    options: VehicleOptions,
) -> Result<(), AppError> {
    let (email, password) = options.credentials.resolve()?;
    let session = ctx.login(&email, &password, LoginRole::Applicant)?.clone();

    let mut wizard = VehicleRegistrationWizard::new(&session);
    println!("Vehicle registration - fee R {}", wizard.fee());

    {
        let raw_type = match options.vehicle_type {
            Some(value) => value,
            None => select_item("Vehicle type", &["car", "truck", "motorcycle", "bus"])?,
        };
        let vehicle_type: VehicleType = raw_type.parse().map_err(AppError::Configuration)?;
        let year = match options.year {
            Some(year) => year,
            None => required_input(None, "Year")?
                .trim()
                .parse()
                .map_err(|_| AppError::configuration("Year must be a number"))?,
        };

        let form = wizard.form_mut();
        form.name = required_input(options.make, "Make")?;
        form.vehicle_type = Some(vehicle_type);
        form.model = required_input(options.model, "Model")?;
        form.year = Some(year);
        form.color = required_input(options.color, "Color")?;
        form.engine_number = required_input(options.engine_number, "Engine number")?;
        form.chassis_number = required_input(options.chassis_number, "Chassis number")?;
        form.license_plate = options.plate.unwrap_or_default();
    }
    wizard.continue_to_payment(Local::now().date_naive())?;

    options.payment.apply(wizard.payment_mut())?;

    wizard.submit(ctx.gateway(), Utc::now())?;

    let confirmation = wizard.confirmation().ok_or(AppError::InvalidTransition)?;
    println!(
        "✅ Registered {} {} (vehicle #{})",
        confirmation.vehicle.name, confirmation.vehicle.model, confirmation.vehicle.id
    );
    println!(
        "   Disc issued {} and valid until {}",
        confirmation.disc.issue_date.format("%Y-%m-%d"),
        confirmation.disc.expiry_date.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
