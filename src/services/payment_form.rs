//! Payment step state shared by every wizard.

use chrono::NaiveDate;

use crate::domain::entities::{CardDetails, PaymentMethod, PaymentOrder, PaymentType};
use crate::domain::validation::{self, ValidationError};

/// Form state for the payment step a wizard ends with.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub method: Option<PaymentMethod>,
    pub card: CardDetails,
}

impl PaymentForm {
    /// Gate for submitting: a method must be chosen and, for card payments,
    /// the card fields must pass the card rules. Cash and EFT ignore them.
    pub fn validate(&self, today: NaiveDate) -> Result<PaymentMethod, ValidationError> {
        let method = self.method.ok_or(ValidationError::MissingField("payment method"))?;
        validation::validate_card(method, &self.card, today)?;
        Ok(method)
    }

    /// Build the wire payload. Card details travel only for card payments.
    pub fn to_order(
        &self,
        payment_type: PaymentType,
        amount: u32,
        date: NaiveDate,
    ) -> Result<PaymentOrder, ValidationError> {
        let method = self.validate(date)?;
        let card = (method == PaymentMethod::Card).then(|| self.card.clone());
        Ok(PaymentOrder { payment_type, method, amount, date, card })
    }

    /// Drop card number and CVV after a failed submission.
    pub fn clear_secrets(&mut self) {
        self.card.clear_secrets();
    }
}
