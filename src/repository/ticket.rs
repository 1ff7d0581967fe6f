//! Repository implementation for support tickets.

use std::collections::{HashMap, HashSet};

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::customer::Customer;
use crate::domain::ticket::{NewTicket, Ticket, TicketStatus};
use crate::models::customer::Customer as DbCustomer;
use crate::models::ticket::{
    NewTicket as DbNewTicket, Ticket as DbTicket, UpdateTicketStatus as DbUpdateTicketStatus,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, TicketListQuery, TicketReader, TicketSortBy, TicketWriter,
};

impl TicketReader for DieselRepository {
    fn get_ticket_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Ticket>> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let ticket = tickets::table
            .filter(tickets::id.eq(id))
            .filter(tickets::org_id.eq(org_id))
            .first::<DbTicket>(&mut conn)
            .optional()?;

        match ticket {
            Some(ticket) => Ok(Some(
                Ticket::try_from(ticket).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_tickets(
        &self,
        query: TicketListQuery,
    ) -> RepositoryResult<(usize, Vec<(Ticket, Customer)>)> {
        use crate::schema::{customers, tickets};

        let mut conn = self.conn()?;

        let build = || {
            let mut items = tickets::table
                .filter(tickets::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(tickets::status.eq(status.to_string()));
            }
            if let Some(priority) = query.priority {
                items = items.filter(tickets::priority.eq(priority.to_string()));
            }
            if let Some(assigned_to) = &query.assigned_to {
                items = items.filter(tickets::assigned_to.eq(assigned_to.clone()));
            }
            if let Some(customer_id) = query.customer_id {
                items = items.filter(tickets::customer_id.eq(customer_id));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    tickets::subject
                        .like(pattern.clone())
                        .or(tickets::body.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((TicketSortBy::CreatedAt, SortDirection::Descending));
        let mut items = match (by, dir) {
            (TicketSortBy::Status, SortDirection::Ascending) => build().order(tickets::status.asc()),
            (TicketSortBy::Status, SortDirection::Descending) => {
                build().order(tickets::status.desc())
            }
            (TicketSortBy::Priority, SortDirection::Ascending) => {
                build().order(tickets::priority.asc())
            }
            (TicketSortBy::Priority, SortDirection::Descending) => {
                build().order(tickets::priority.desc())
            }
            (TicketSortBy::UpdatedAt, SortDirection::Ascending) => {
                build().order(tickets::updated_at.asc())
            }
            (TicketSortBy::UpdatedAt, SortDirection::Descending) => {
                build().order(tickets::updated_at.desc())
            }
            (TicketSortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(tickets::created_at.asc())
            }
            (TicketSortBy::CreatedAt, SortDirection::Descending) => {
                build().order(tickets::created_at.desc())
            }
        }
        .then_order_by(tickets::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_tickets = items.load::<DbTicket>(&mut conn)?;

        // Load the owning customers with one IN query and stitch in memory.
        let customer_ids: Vec<i32> = {
            let set: HashSet<i32> = db_tickets.iter().map(|t| t.customer_id).collect();
            set.into_iter().collect()
        };
        let db_customers = customers::table
            .filter(customers::id.eq_any(customer_ids))
            .load::<DbCustomer>(&mut conn)?;
        let customer_map: HashMap<i32, DbCustomer> =
            db_customers.into_iter().map(|c| (c.id, c)).collect();

        let combined = db_tickets
            .into_iter()
            .filter_map(|ticket| {
                customer_map
                    .get(&ticket.customer_id)
                    .cloned()
                    .map(|customer| (ticket, customer))
            })
            .map(|(ticket, customer)| {
                Ok((
                    Ticket::try_from(ticket).map_err(RepositoryError::from)?,
                    Customer::try_from(customer).map_err(RepositoryError::from)?,
                ))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, combined))
    }
}

impl TicketWriter for DieselRepository {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let db_new: DbNewTicket = new_ticket.into();

        let created = diesel::insert_into(tickets::table)
            .values(&db_new)
            .get_result::<DbTicket>(&mut conn)?;

        Ticket::try_from(created).map_err(RepositoryError::from)
    }

    fn update_ticket_status(
        &self,
        id: i32,
        org_id: i32,
        status: TicketStatus,
        assigned_to: Option<&str>,
    ) -> RepositoryResult<Ticket> {
        use crate::schema::tickets;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTicketStatus {
            status: status.to_string(),
            assigned_to,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let updated = diesel::update(
            tickets::table
                .filter(tickets::id.eq(id))
                .filter(tickets::org_id.eq(org_id)),
        )
        .set(&db_updates)
        .get_result::<DbTicket>(&mut conn)?;

        Ticket::try_from(updated).map_err(RepositoryError::from)
    }
}
