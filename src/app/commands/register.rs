//! `register` command: run the applicant registration wizard.

use chrono::Local;

use crate::app::AppContext;
use crate::app::commands::prompts::{parse_date, required_input, required_password};
use crate::domain::AppError;
use crate::ports::LicensingGateway;
use crate::services::RegistrationWizard;

#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub cellphone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub birth_date: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

pub fn execute<G: LicensingGateway>(
    ctx: &AppContext<G>,
    options: RegisterOptions,
) -> Result<(), AppError> {
    let mut wizard = RegistrationWizard::new();
    {
        let birth_date = parse_date(&required_input(options.birth_date, "Date of birth (YYYY-MM-DD)")?)?;
        let form = wizard.form_mut();
        form.first_name = required_input(options.first_name, "First name")?;
        form.last_name = required_input(options.last_name, "Last name")?;
        form.id_number = required_input(options.id_number, "ID number")?;
        form.email = required_input(options.email, "Email")?;
        form.cellphone = required_input(options.cellphone, "Contact number")?;
        form.street = required_input(options.street, "Street")?;
        form.city = required_input(options.city, "City")?;
        form.province = required_input(options.province, "Province")?;
        form.country = required_input(options.country, "Country")?;
        form.birth_date = Some(birth_date);
        form.password = required_password(options.password, "Password")?;
        form.confirm_password = required_password(options.confirm_password, "Confirm password")?;
    }

    wizard.submit(ctx.gateway(), Local::now().date_naive())?;

    let applicant = wizard.applicant().ok_or(AppError::InvalidTransition)?;
    println!(
        "✅ Registered {} {} (applicant #{})",
        applicant.first_name, applicant.last_name, applicant.id
    );
    println!("   Review status: {}", applicant.status.as_str());
    Ok(())
}
