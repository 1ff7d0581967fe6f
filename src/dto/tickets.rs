//! DTOs for the tickets screen.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::ticket::Ticket;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct TicketsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TicketsPageData {
    /// Tickets joined with the customer that raised them.
    pub tickets: Paginated<(Ticket, Customer)>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
    pub priority_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
