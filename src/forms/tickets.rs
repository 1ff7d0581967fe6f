use serde::Deserialize;
use validator::Validate;

use crate::domain::ticket::{NewTicket, TicketPriority, TicketStatus};
use crate::forms::{FormError, empty_string_as_none};

#[derive(Deserialize, Validate)]
/// Form data for opening a support ticket.
pub struct AddTicketForm {
    pub customer_id: i32,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub priority: String,
    pub assigned_to: Option<String>,
}

impl AddTicketForm {
    pub fn to_new_ticket(self, org_id: i32) -> Result<NewTicket, FormError> {
        let priority = TicketPriority::try_from(self.priority.as_str())
            .map_err(|_| FormError::InvalidStatus)?;
        NewTicket::new(
            org_id,
            self.customer_id,
            self.subject,
            self.body,
            priority,
            self.assigned_to,
        )
        .map_err(|e| FormError::InvalidField(e.to_string()))
    }
}

#[derive(Deserialize)]
/// Status transition submitted from the tickets table.
pub struct TicketStatusForm {
    pub id: i32,
    pub status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub assigned_to: Option<String>,
}

impl TicketStatusForm {
    pub fn status(&self) -> Result<TicketStatus, FormError> {
        TicketStatus::try_from(self.status.as_str()).map_err(|_| FormError::InvalidStatus)
    }
}
