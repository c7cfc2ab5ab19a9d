//! Traffic tickets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Outstanding,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficTicket {
    pub ticket_number: String,
    pub offense: String,
    pub location: String,
    pub date: NaiveDate,
    pub amount: u32,
    pub due_date: NaiveDate,
    pub status: TicketStatus,
}

impl TrafficTicket {
    /// Overdue tickets attract extra penalties; the payment wizard warns.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overdue_is_strictly_past_due() {
        let ticket = TrafficTicket {
            ticket_number: "TF123456".into(),
            offense: "Speeding - 20km/h over limit".into(),
            location: "Main Road, Cape Town".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            amount: 1500,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            status: TicketStatus::Outstanding,
        };
        assert!(ticket.is_overdue(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()));
        assert!(!ticket.is_overdue(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
    }
}
