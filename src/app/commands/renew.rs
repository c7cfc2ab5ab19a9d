//! `renew-disc` command: drive the disc renewal wizard.

use chrono::Utc;

use crate::app::AppContext;
use crate::app::commands::prompts::{Credentials, PaymentInput, select_index};
use crate::domain::AppError;
use crate::domain::entities::LoginRole;
use crate::ports::LicensingGateway;
use crate::services::DiscRenewalWizard;

#[derive(Debug, Clone)]
pub struct RenewOptions {
    pub credentials: Credentials,
    pub plate: Option<String>,
    pub payment: PaymentInput,
}

pub fn execute<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    options: RenewOptions,
) -> Result<(), AppError> {
    let (email, password) = options.credentials.resolve()?;
    let session = ctx.login(&email, &password, LoginRole::Applicant)?.clone();

    let now = Utc::now();
    let mut wizard = DiscRenewalWizard::load(ctx.gateway(), &session, now)?;

    if wizard.expired().is_empty() {
        println!("No expired discs to renew 🎉");
        return Ok(());
    }

    let index = match options.plate {
        Some(plate) => {
            let wanted = plate.trim().to_uppercase();
            wizard
                .expired()
                .iter()
                .position(|vehicle| vehicle.license_plate.as_deref() == Some(wanted.as_str()))
                .ok_or_else(|| {
                    AppError::configuration(format!("No expired disc found for plate '{}'", plate))
                })?
        }
        None => {
            let labels: Vec<String> = wizard
                .expired()
                .iter()
                .map(|vehicle| {
                    let plate = vehicle.license_plate.as_deref().unwrap_or("no plate");
                    let expired = vehicle
                        .disc
                        .as_ref()
                        .map(|disc| disc.expiry_date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    format!("{} {} ({}), expired {}", vehicle.name, vehicle.model, plate, expired)
                })
                .collect();
            select_index("Vehicle to renew", &labels)?
        }
    };
    wizard.select(index)?;
    println!("Renewal fee: R {}", wizard.fee());

    options.payment.apply(wizard.payment_mut())?;

    wizard.submit(ctx.gateway(), now)?;

    let confirmation = wizard.confirmation().ok_or(AppError::InvalidTransition)?;
    println!(
        "✅ Disc renewed! {} {} is now valid until {}",
        confirmation.vehicle.name,
        confirmation.vehicle.model,
        confirmation.disc.expiry_date.format("%Y-%m-%d")
    );
    Ok(())
}
