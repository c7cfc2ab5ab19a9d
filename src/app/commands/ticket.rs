//! `pay-ticket` command: drive the traffic-ticket payment wizard.

use chrono::Local;

use crate::app::AppContext;
use crate::app::commands::prompts::{PaymentInput, required_input};
use crate::domain::AppError;
use crate::ports::LicensingGateway;
use crate::services::TicketPaymentWizard;

#[derive(Debug, Clone)]
pub struct TicketOptions {
    pub ticket_number: String,
    pub license_number: Option<String>,
    pub payment: PaymentInput,
}

pub fn execute<G: LicensingGateway>(
    ctx: &AppContext<G>,
    options: TicketOptions,
) -> Result<(), AppError> {
    let mut wizard = TicketPaymentWizard::new();
    wizard.search_mut().ticket_number = options.ticket_number;
    wizard.search_mut().license_number =
        required_input(options.license_number, "Driver's license number")?;

    let ticket = wizard.find(ctx.gateway())?.clone();
    println!("Ticket {}: {}", ticket.ticket_number, ticket.offense);
    println!("   {} on {}", ticket.location, ticket.date);
    println!("   Amount due: R {} (due {})", ticket.amount, ticket.due_date);

    let today = Local::now().date_naive();
    if wizard.is_overdue(today) {
        println!("⚠️  This ticket is overdue. Additional penalties may apply.");
    }

    options.payment.apply(wizard.payment_mut())?;

    wizard.submit(ctx.gateway(), today)?;

    let confirmation = wizard.confirmation().ok_or(AppError::InvalidTransition)?;
    println!("✅ Payment successful! Reference {}", confirmation.reference);
    println!("   Paid R {} for ticket {}", confirmation.payment.amount, ticket.ticket_number);
    Ok(())
}
