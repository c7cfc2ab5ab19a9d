//! `login` command: verify credentials and print the account summary.

use crate::app::AppContext;
use crate::app::commands::prompts::Credentials;
use crate::domain::AppError;
use crate::domain::entities::LoginRole;
use crate::ports::LicensingGateway;

pub fn execute<G: LicensingGateway>(
    ctx: &mut AppContext<G>,
    credentials: Credentials,
    admin: bool,
) -> Result<(), AppError> {
    let (email, password) = credentials.resolve()?;
    let role = if admin { LoginRole::Admin } else { LoginRole::Applicant };

    let session = ctx.login(&email, &password, role)?;
    println!("✅ Welcome {}!", session.display_name());
    Ok(())
}
