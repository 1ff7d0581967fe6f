//! Services backing the customer screens.

use validator::Validate;

use crate::collection::{FilterState, SortDirection};
use crate::domain::activity::NewActivity;
use crate::domain::customer::CustomerStatus;
use crate::dto::customers::{CustomerPageData, CustomersPageData, CustomersQuery};
use crate::forms::customers::{
    AddCustomerForm, DeleteCustomerForm, SaveCustomerForm, UploadCustomersForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    ActivityWriter, CustomerListQuery, CustomerReader, CustomerSortBy, CustomerWriter,
    PackageReader, PaymentReader, StationListQuery, StationReader, TicketListQuery, TicketReader,
};
use crate::services::{ServiceError, ServiceResult, fetch_clamped, record_activity};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Entity-specific filters of the customers list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerFilters {
    pub status: Option<CustomerStatus>,
    pub package_id: Option<i32>,
}

/// Loads one page of the customers list.
pub fn load_customers_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CustomersQuery,
) -> ServiceResult<CustomersPageData>
where
    R: CustomerReader + PackageReader + StationReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(CustomerSortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Ascending);
            (by, dir)
        });
    let filters = CustomerFilters {
        status: query
            .status
            .as_deref()
            .and_then(|s| CustomerStatus::try_from(s).ok()),
        package_id: query.package,
    };

    let mut state = FilterState::from_params(
        query.page,
        query.per_page,
        query.q.clone(),
        sort,
        filters.clone(),
    );

    let search = state.search.clone();
    let (total, customers) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = CustomerListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(status) = filters.status {
            list_query = list_query.status(status);
        }
        if let Some(package_id) = filters.package_id {
            list_query = list_query.package(package_id);
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_customers(list_query)
    })?;

    let packages = repo.list_packages(user.org_id)?;
    let (_, stations) = repo.list_stations(StationListQuery::new(user.org_id))?;

    Ok(CustomersPageData {
        customers: Paginated::new(customers, state.page(), state.per_page(), total),
        packages,
        stations,
        search_query: state.search.clone(),
        status_filter: filters.status.map(|s| s.to_string()),
        package_filter: filters.package_id,
        sort: query.sort,
        dir: query.dir,
    })
}

/// Loads the customer profile page with its recent billing and tickets.
pub fn load_customer_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
) -> ServiceResult<CustomerPageData>
where
    R: CustomerReader + PackageReader + StationReader + PaymentReader + TicketReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let customer = repo
        .get_customer_by_id(customer_id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let package = match customer.package_id {
        Some(id) => repo.get_package_by_id(id, user.org_id)?,
        None => None,
    };
    let station = match customer.station_id {
        Some(id) => repo.get_station_by_id(id, user.org_id)?,
        None => None,
    };

    let payments = repo.list_customer_payments(customer.id, user.org_id, 10)?;
    let (_, tickets) = repo.list_tickets(TicketListQuery::new(user.org_id).customer(customer.id))?;
    let tickets = tickets.into_iter().map(|(ticket, _)| ticket).collect();

    let packages = repo.list_packages(user.org_id)?;
    let (_, stations) = repo.list_stations(StationListQuery::new(user.org_id))?;

    Ok(CustomerPageData {
        customer,
        package,
        station,
        packages,
        stations,
        payments,
        tickets,
    })
}

/// Validates the add-customer form and persists a new customer record.
pub fn add_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCustomerForm,
) -> ServiceResult<()>
where
    R: CustomerWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_customer = form.to_new_customer(user.org_id);
    let name = new_customer.name.clone();

    repo.create_customers(&[new_customer]).map_err(|err| {
        log::error!("Failed to add a customer: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "customer.created").detail(name),
    );

    Ok(())
}

/// Applies the save form to an existing customer.
pub fn save_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveCustomerForm,
) -> ServiceResult<i32>
where
    R: CustomerReader + CustomerWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.get_customer_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form
        .to_updates()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.update_customer(form.id, user.org_id, &updates).map_err(|err| {
        log::error!("Failed to update customer: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "customer.updated")
            .entity("customer", updated.id),
    );

    Ok(updated.id)
}

/// Removes a customer along with its tickets; equipment returns to stock.
pub fn delete_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: DeleteCustomerForm,
) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let customer = repo
        .get_customer_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_customer(customer.id, user.org_id).map_err(|err| {
        log::error!("Failed to delete customer: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "customer.deleted").detail(customer.name),
    );

    Ok(())
}

/// Parses the uploaded CSV file and creates customer records in bulk.
pub fn upload_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &mut UploadCustomersForm,
) -> ServiceResult<usize>
where
    R: CustomerWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let customers = form.parse(user.org_id).map_err(|err| {
        log::error!("Failed to parse customers: {err}");
        ServiceError::Form(err.to_string())
    })?;

    if customers.is_empty() {
        return Err(ServiceError::Form("CSV file contains no rows".to_string()));
    }

    let created = repo.create_customers(&customers).map_err(|err| {
        log::error!("Failed to add customers: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "customers.imported")
            .detail(format!("{created} customers")),
    );

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "admin@example.com".into(),
            name: "Admin".into(),
            org_id: 1,
            roles: vec![SERVICE_ACCESS_ROLE.into(), SERVICE_ADMIN_ROLE.into()],
            exp: 0,
        }
    }

    fn viewer() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: vec![],
            ..admin()
        }
    }

    #[test]
    fn list_requires_access_role() {
        let repo = MockRepository::new();
        let result = load_customers_page(&repo, &viewer(), CustomersQuery::default());
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn out_of_range_page_is_clamped_and_refetched() {
        let mut repo = MockRepository::new();
        // First fetch asks for page 9; the clamped retry asks for page 3.
        repo.expect_list_customers()
            .times(2)
            .returning(|query| {
                let pagination = query.pagination.expect("list is paginated");
                assert!(pagination.page == 9 || pagination.page == 3);
                Ok((47, vec![]))
            });
        repo.expect_list_packages().returning(|_| Ok(vec![]));
        repo.expect_list_stations().returning(|_| Ok((0, vec![])));

        let query = CustomersQuery {
            page: Some(9),
            per_page: Some(20),
            ..CustomersQuery::default()
        };
        let data = load_customers_page(&repo, &admin(), query).unwrap();
        assert_eq!(data.customers.page, 3);
        assert_eq!(data.customers.total, 47);
    }

    #[test]
    fn add_customer_requires_admin() {
        let repo = MockRepository::new();
        let form = AddCustomerForm {
            name: "Jane".into(),
            email: None,
            phone: None,
            address: None,
            package_id: None,
            station_id: None,
        };
        let user = AuthenticatedUser {
            roles: vec![SERVICE_ACCESS_ROLE.into()],
            ..admin()
        };
        assert!(matches!(
            add_customer(&repo, &user, form),
            Err(ServiceError::Unauthorized)
        ));
    }
}
