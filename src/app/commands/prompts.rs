//! Interactive fallbacks for values not given as flags.

use chrono::NaiveDate;
use dialoguer::{Error as DialoguerError, Input, Password, Select};

use crate::domain::AppError;
use crate::domain::entities::PaymentMethod;
use crate::services::PaymentForm;

fn prompt_error(err: DialoguerError) -> AppError {
    AppError::configuration(format!("Failed to read input: {}", err))
}

/// Use the flag value when given, otherwise prompt.
pub(crate) fn required_input(value: Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(value) => Ok(value),
        None => Input::new().with_prompt(label).interact_text().map_err(prompt_error),
    }
}

pub(crate) fn required_password(value: Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(value) => Ok(value),
        None => Password::new().with_prompt(label).interact().map_err(prompt_error),
    }
}

/// Pick one entry from a fixed list, returning its index.
pub(crate) fn select_index(label: &str, items: &[String]) -> Result<usize, AppError> {
    Select::new().with_prompt(label).items(items).default(0).interact().map_err(prompt_error)
}

pub(crate) fn select_item(label: &str, items: &[&str]) -> Result<String, AppError> {
    let owned: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    let index = select_index(label, &owned)?;
    Ok(owned[index].clone())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::configuration(format!("'{}' is not a date (expected YYYY-MM-DD)", raw)))
}

/// Login flags shared by every authenticated command.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Resolve both values, prompting for whichever is missing.
    pub fn resolve(self) -> Result<(String, String), AppError> {
        let email = required_input(self.email, "Email")?;
        let password = required_password(self.password, "Password")?;
        Ok((email, password))
    }
}

/// Payment flags shared by every paying command.
#[derive(Debug, Clone, Default)]
pub struct PaymentInput {
    pub method: Option<String>,
    pub card_holder: Option<String>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

impl PaymentInput {
    /// Fill a wizard's payment form, prompting for whatever was not given.
    /// Card fields are only collected for card payments.
    pub fn apply(self, form: &mut PaymentForm) -> Result<(), AppError> {
        let raw = match self.method {
            Some(method) => method,
            None => select_item("Payment method", &["card", "cash", "eft"])?,
        };
        let method: PaymentMethod = raw.parse().map_err(AppError::Configuration)?;
        form.method = Some(method);

        if method == PaymentMethod::Card {
            form.card.cardholder_name = required_input(self.card_holder, "Cardholder name")?;
            form.card.card_number = required_input(self.card_number, "Card number")?;
            form.card.expiry = required_input(self.expiry, "Expiry date (MM/YY)")?;
            form.card.cvv = required_password(self.cvv, "CVV")?;
        }

        Ok(())
    }
}
