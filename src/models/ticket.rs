use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ticket::{
    NewTicket as DomainNewTicket, Ticket as DomainTicket, TicketPriority, TicketStatus,
};
use crate::domain::types::TypeConstraintError;
use crate::models::customer::Customer;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::tickets)]
/// Diesel model for [`crate::domain::ticket::Ticket`].
pub struct Ticket {
    pub id: i32,
    pub org_id: i32,
    pub customer_id: i32,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tickets)]
pub struct NewTicket<'a> {
    pub org_id: i32,
    pub customer_id: i32,
    pub subject: &'a str,
    pub body: &'a str,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tickets)]
/// Status transition applied to an existing ticket.
pub struct UpdateTicketStatus<'a> {
    pub status: String,
    pub assigned_to: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Ticket> for DomainTicket {
    type Error = TypeConstraintError;

    fn try_from(ticket: Ticket) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ticket.id,
            org_id: ticket.org_id,
            customer_id: ticket.customer_id,
            subject: ticket.subject,
            body: ticket.body,
            status: TicketStatus::try_from(ticket.status.as_str())?,
            priority: TicketPriority::try_from(ticket.priority.as_str())?,
            assigned_to: ticket.assigned_to,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTicket> for NewTicket<'a> {
    fn from(ticket: &'a DomainNewTicket) -> Self {
        Self {
            org_id: ticket.org_id,
            customer_id: ticket.customer_id,
            subject: ticket.subject.as_str(),
            body: ticket.body.as_str(),
            status: TicketStatus::Open.to_string(),
            priority: ticket.priority.to_string(),
            assigned_to: ticket.assigned_to.as_deref(),
        }
    }
}
