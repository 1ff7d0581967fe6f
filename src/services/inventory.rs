//! Services backing the inventory screen.

use validator::Validate;

use crate::collection::{FilterState, SortDirection};
use crate::domain::activity::NewActivity;
use crate::domain::inventory::{InventoryCategory, InventoryStatus};
use crate::dto::inventory::{InventoryPageData, InventoryQuery};
use crate::forms::inventory::{AddItemForm, AssignItemForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    ActivityWriter, CustomerListQuery, CustomerReader, CustomerSortBy, InventoryListQuery,
    InventoryReader, InventorySortBy, InventoryWriter,
};
use crate::services::{ServiceError, ServiceResult, fetch_clamped, record_activity};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Entity-specific filters of the inventory list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryFilters {
    pub category: Option<InventoryCategory>,
    pub status: Option<InventoryStatus>,
}

/// Loads one page of the inventory list.
pub fn load_inventory_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: InventoryQuery,
) -> ServiceResult<InventoryPageData>
where
    R: InventoryReader + CustomerReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(InventorySortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Ascending);
            (by, dir)
        });
    let filters = InventoryFilters {
        category: query
            .category
            .as_deref()
            .and_then(|s| InventoryCategory::try_from(s).ok()),
        status: query
            .status
            .as_deref()
            .and_then(|s| InventoryStatus::try_from(s).ok()),
    };

    let mut state = FilterState::from_params(
        query.page,
        query.per_page,
        query.q.clone(),
        sort,
        filters.clone(),
    );

    let search = state.search.clone();
    let (total, items) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = InventoryListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(category) = filters.category {
            list_query = list_query.category(category);
        }
        if let Some(status) = filters.status {
            list_query = list_query.status(status);
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_inventory(list_query)
    })?;

    let (_, customers) = repo.list_customers(
        CustomerListQuery::new(user.org_id)
            .sort(CustomerSortBy::Name, SortDirection::Ascending),
    )?;

    Ok(InventoryPageData {
        items: Paginated::new(items, state.page(), state.per_page(), total),
        customers,
        search_query: state.search.clone(),
        category_filter: filters.category.map(|c| c.to_string()),
        status_filter: filters.status.map(|s| s.to_string()),
        sort: query.sort,
        dir: query.dir,
    })
}

/// Validates and persists a new inventory item.
pub fn add_item<R>(repo: &R, user: &AuthenticatedUser, form: AddItemForm) -> ServiceResult<()>
where
    R: InventoryWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_item = form
        .to_new_item(user.org_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_item(&new_item).map_err(|err| {
        log::error!("Failed to add inventory item: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "inventory.created")
            .entity("inventory_item", created.id)
            .detail(created.name),
    );

    Ok(())
}

/// Hands an item to a customer or returns it to stock.
pub fn assign_item<R>(repo: &R, user: &AuthenticatedUser, form: AssignItemForm) -> ServiceResult<()>
where
    R: InventoryReader + CustomerReader + InventoryWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_item_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(customer_id) = form.customer_id {
        repo.get_customer_by_id(customer_id, user.org_id)?
            .ok_or(ServiceError::NotFound)?;
    }

    let updated = repo
        .assign_item(form.id, user.org_id, form.customer_id)
        .map_err(|err| {
            log::error!("Failed to assign inventory item: {err}");
            err
        })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "inventory.assigned")
            .entity("inventory_item", updated.id)
            .detail(updated.status.to_string()),
    );

    Ok(())
}
