//! `admin` subcommands: record deletion and applicant status review.

use crate::app::AppContext;
use crate::app::commands::prompts::{Credentials, required_input};
use crate::domain::AppError;
use crate::domain::entities::{ApplicantStatus, EntityKind, LoginRole};
use crate::ports::LicensingGateway;

#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub credentials: Credentials,
    pub kind: String,
    pub id: u64,
}

pub fn delete<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    options: DeleteOptions,
) -> Result<(), AppError> {
    let (email, password) = options.credentials.resolve()?;
    ctx.login(&email, &password, LoginRole::Admin)?;

    let kind: EntityKind = options.kind.parse().map_err(AppError::Configuration)?;
    ctx.gateway().delete_entity(kind, options.id)?;

    println!("✅ Deleted {} #{}", options.kind, options.id);
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SetStatusOptions {
    pub credentials: Credentials,
    pub id: u64,
    pub status: Option<String>,
    pub reason: Option<String>,
}

pub fn set_status<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    options: SetStatusOptions,
) -> Result<(), AppError> {
    let (email, password) = options.credentials.resolve()?;
    ctx.login(&email, &password, LoginRole::Admin)?;

    let raw = required_input(options.status, "Status (PENDING/ACCEPTED/REJECTED)")?;
    let status: ApplicantStatus = raw.parse().map_err(AppError::Configuration)?;

    ctx.gateway().update_applicant_status(options.id, status, options.reason.as_deref())?;

    println!("✅ Applicant #{} set to {}", options.id, status.as_str());
    Ok(())
}
