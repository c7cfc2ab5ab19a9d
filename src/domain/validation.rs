//! Field-level and cross-field validation rules.
//!
//! Every rule here is pure and synchronous. Failures are reported as
//! [`ValidationError`] kinds and block a wizard transition before anything
//! touches the network.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::entities::{CardDetails, PaymentMethod};

/// Characters accepted as the password "special" class.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Client-side validation failure: the rule that failed, with the offending
/// field where one exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ID number must be exactly 13 digits")]
    InvalidIdFormat,
    #[error("ID number and date of birth do not match")]
    IdDobMismatch,
    #[error("You must be at least 18 years old")]
    Underage,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Password must include at least one lowercase letter")]
    PasswordMissingLower,
    #[error("Password must include at least one uppercase letter")]
    PasswordMissingUpper,
    #[error("Password must include at least one number")]
    PasswordMissingDigit,
    #[error("Password must include at least one special character (@$!%*?&)")]
    PasswordMissingSpecial,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Card number must be 16 digits")]
    InvalidCardNumber,
    #[error("CVV must be 3 digits")]
    InvalidCvv,
    #[error("Expiry date must be in MM/YY format")]
    InvalidExpiryFormat,
    #[error("Card expiry date cannot be in the past")]
    CardExpired,
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("'{0}' is not a known testing venue")]
    UnknownVenue(String),
    #[error("'{0}' is not an available time slot")]
    InvalidTimeSlot(String),
    #[error("License plate may be at most 7 characters")]
    InvalidLicensePlate,
    #[error("Vehicle year {0} is out of range")]
    InvalidVehicleYear(i32),
}

/// True iff `id` is exactly 13 ASCII digits.
pub fn is_valid_id_number(id: &str) -> bool {
    id.len() == 13 && id.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the YYMMDD prefix of a 13-digit ID number into a calendar date.
///
/// The two-digit year resolves against `today`: values at or below today's
/// two-digit year are read as 2000s, anything above as 1900s.
pub fn id_embedded_birth_date(id: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if !is_valid_id_number(id) {
        return Err(ValidationError::InvalidIdFormat);
    }

    let yy: i32 = id[0..2].parse().map_err(|_| ValidationError::InvalidIdFormat)?;
    let month: u32 = id[2..4].parse().map_err(|_| ValidationError::InvalidIdFormat)?;
    let day: u32 = id[4..6].parse().map_err(|_| ValidationError::InvalidIdFormat)?;

    let century = if yy <= today.year() % 100 { 2000 } else { 1900 };

    NaiveDate::from_ymd_opt(century + yy, month, day).ok_or(ValidationError::InvalidIdFormat)
}

/// Cross-check an entered birth date against the one embedded in the ID number.
pub fn birth_date_matches_id(
    id: &str,
    entered: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let embedded = id_embedded_birth_date(id, today)?;
    if embedded != entered {
        return Err(ValidationError::IdDobMismatch);
    }
    Ok(())
}

/// Whole-year age at `today`, adjusted down when the birthday has not yet
/// passed this year.
pub fn age_at(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// True iff the person is 18 or older at `today`.
pub fn is_adult(birth_date: NaiveDate, today: NaiveDate) -> bool {
    age_at(birth_date, today) >= 18
}

/// Password strength gate. Checks run in the order the registration form
/// applies them: lowercase, uppercase, digit, special, length. The first
/// missing class wins.
pub fn check_password_strength(password: &str) -> Result<(), ValidationError> {
    let password = password.trim();
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLower);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUpper);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(ValidationError::PasswordMissingSpecial);
    }
    if password.len() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.trim() != confirm.trim() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Card rules, applied only when the payment method is CARD. Cash and EFT
/// payments ignore card fields entirely.
pub fn validate_card(
    method: PaymentMethod,
    card: &CardDetails,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if method != PaymentMethod::Card {
        return Ok(());
    }

    require_fields(&[
        ("cardholder name", &card.cardholder_name),
        ("card number", &card.card_number),
        ("expiry date", &card.expiry),
        ("CVV", &card.cvv),
    ])?;

    // Card inputs are often typed with grouping spaces ("1234 5678 ...").
    let digits: String = card.card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() != 16 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidCardNumber);
    }

    if card.cvv.len() != 3 || !card.cvv.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidCvv);
    }

    let (month, year) = parse_expiry(&card.expiry)?;
    let current_month = today.month();
    let current_year = (today.year() % 100) as u32;
    if year < current_year || (year == current_year && month < current_month) {
        return Err(ValidationError::CardExpired);
    }

    Ok(())
}

/// Parse `MM/YY` into (month, two-digit year).
fn parse_expiry(raw: &str) -> Result<(u32, u32), ValidationError> {
    let (m, y) = raw.split_once('/').ok_or(ValidationError::InvalidExpiryFormat)?;
    if y.len() != 2 {
        return Err(ValidationError::InvalidExpiryFormat);
    }
    let month: u32 = m.parse().map_err(|_| ValidationError::InvalidExpiryFormat)?;
    let year: u32 = y.parse().map_err(|_| ValidationError::InvalidExpiryFormat)?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidExpiryFormat);
    }
    Ok((month, year))
}

/// Presence check over `(field name, value)` pairs. The first empty value,
/// scanning left to right, is reported; whitespace-only counts as empty.
pub fn require_fields(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    for &(name, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(name));
        }
    }
    Ok(())
}
