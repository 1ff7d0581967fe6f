//! Services backing the support ticket screens.

use validator::Validate;

use crate::collection::{FilterState, SortDirection};
use crate::domain::activity::NewActivity;
use crate::domain::ticket::{TicketPriority, TicketStatus};
use crate::dto::tickets::{TicketsPageData, TicketsQuery};
use crate::forms::tickets::{AddTicketForm, TicketStatusForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    ActivityWriter, CustomerReader, TicketListQuery, TicketReader, TicketSortBy, TicketWriter,
};
use crate::services::{ServiceError, ServiceResult, fetch_clamped, record_activity};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_AGENT_ROLE};

/// Entity-specific filters of the tickets list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

/// Loads one page of the tickets list.
///
/// Agents without the admin role only see tickets assigned to them.
pub fn load_tickets_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: TicketsQuery,
) -> ServiceResult<TicketsPageData>
where
    R: TicketReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(TicketSortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Descending);
            (by, dir)
        });
    let filters = TicketFilters {
        status: query
            .status
            .as_deref()
            .and_then(|s| TicketStatus::try_from(s).ok()),
        priority: query
            .priority
            .as_deref()
            .and_then(|s| TicketPriority::try_from(s).ok()),
    };

    let scoped_agent = (user.has_role(SERVICE_AGENT_ROLE) && !user.has_role(SERVICE_ADMIN_ROLE))
        .then(|| user.email.clone());

    let mut state = FilterState::from_params(
        query.page,
        query.per_page,
        query.q.clone(),
        sort,
        filters.clone(),
    );

    let search = state.search.clone();
    let (total, tickets) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = TicketListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(status) = filters.status {
            list_query = list_query.status(status);
        }
        if let Some(priority) = filters.priority {
            list_query = list_query.priority(priority);
        }
        if let Some(email) = &scoped_agent {
            list_query = list_query.assigned_to(email.clone());
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_tickets(list_query)
    })?;

    Ok(TicketsPageData {
        tickets: Paginated::new(tickets, state.page(), state.per_page(), total),
        search_query: state.search.clone(),
        status_filter: filters.status.map(|s| s.to_string()),
        priority_filter: filters.priority.map(|p| p.to_string()),
        sort: query.sort,
        dir: query.dir,
    })
}

/// Validates the add-ticket form and opens a ticket for the customer.
pub fn add_ticket<R>(repo: &R, user: &AuthenticatedUser, form: AddTicketForm) -> ServiceResult<()>
where
    R: CustomerReader + TicketWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.get_customer_by_id(form.customer_id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let new_ticket = form
        .to_new_ticket(user.org_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_ticket(&new_ticket).map_err(|err| {
        log::error!("Failed to create ticket: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "ticket.created")
            .entity("ticket", created.id)
            .detail(created.subject),
    );

    Ok(())
}

/// Moves a ticket to a new status, optionally reassigning it.
pub fn update_ticket_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: TicketStatusForm,
) -> ServiceResult<()>
where
    R: TicketReader + TicketWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let status = form
        .status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let ticket = repo
        .get_ticket_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    // Agents may only touch their own tickets.
    if user.has_role(SERVICE_AGENT_ROLE)
        && !user.has_role(SERVICE_ADMIN_ROLE)
        && ticket.assigned_to.as_deref() != Some(user.email.as_str())
    {
        return Err(ServiceError::Unauthorized);
    }

    let updated = repo
        .update_ticket_status(form.id, user.org_id, status, form.assigned_to.as_deref())
        .map_err(|err| {
            log::error!("Failed to update ticket: {err}");
            err
        })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "ticket.status_changed")
            .entity("ticket", updated.id)
            .detail(updated.status.to_string()),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn agent() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".into(),
            email: "agent@example.com".into(),
            name: "Agent".into(),
            org_id: 1,
            roles: vec![SERVICE_ACCESS_ROLE.into(), SERVICE_AGENT_ROLE.into()],
            exp: 0,
        }
    }

    #[test]
    fn agent_list_is_scoped_to_own_tickets() {
        let mut repo = MockRepository::new();
        repo.expect_list_tickets()
            .withf(|query| query.assigned_to.as_deref() == Some("agent@example.com"))
            .returning(|_| Ok((0, vec![])));

        let data = load_tickets_page(&repo, &agent(), TicketsQuery::default()).unwrap();
        assert_eq!(data.tickets.total, 0);
    }

    #[test]
    fn agent_cannot_close_someone_elses_ticket() {
        let mut repo = MockRepository::new();
        repo.expect_get_ticket_by_id().returning(|id, org_id| {
            Ok(Some(crate::domain::ticket::Ticket {
                id,
                org_id,
                customer_id: 1,
                assigned_to: Some("other@example.com".into()),
                ..Default::default()
            }))
        });

        let form = TicketStatusForm {
            id: 5,
            status: "closed".into(),
            assigned_to: None,
        };
        assert!(matches!(
            update_ticket_status(&repo, &agent(), form),
            Err(ServiceError::Unauthorized)
        ));
    }
}
