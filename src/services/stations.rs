//! Services backing the stations screen.

use validator::Validate;

use crate::collection::{FilterState, SortDirection};
use crate::domain::activity::NewActivity;
use crate::domain::station::StationStatus;
use crate::dto::stations::{StationsPageData, StationsQuery};
use crate::forms::stations::{AddStationForm, SaveStationForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    ActivityWriter, StationListQuery, StationReader, StationSortBy, StationWriter,
};
use crate::services::{ServiceError, ServiceResult, fetch_clamped, record_activity};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads one page of the stations list.
pub fn load_stations_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: StationsQuery,
) -> ServiceResult<StationsPageData>
where
    R: StationReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(StationSortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Ascending);
            (by, dir)
        });
    let status = query
        .status
        .as_deref()
        .and_then(|s| StationStatus::try_from(s).ok());

    let mut state =
        FilterState::from_params(query.page, query.per_page, query.q.clone(), sort, status);

    let search = state.search.clone();
    let (total, stations) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = StationListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(status) = status {
            list_query = list_query.status(status);
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_stations(list_query)
    })?;

    Ok(StationsPageData {
        stations: Paginated::new(stations, state.page(), state.per_page(), total),
        search_query: state.search.clone(),
        status_filter: status.map(|s| s.to_string()),
        sort: query.sort,
        dir: query.dir,
    })
}

/// Validates and persists a new station.
pub fn add_station<R>(repo: &R, user: &AuthenticatedUser, form: AddStationForm) -> ServiceResult<()>
where
    R: StationWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let created = repo
        .create_station(&form.to_new_station(user.org_id))
        .map_err(|err| {
            log::error!("Failed to add station: {err}");
            err
        })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "station.created")
            .entity("station", created.id)
            .detail(created.name),
    );

    Ok(())
}

/// Applies the save form to an existing station.
pub fn save_station<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveStationForm,
) -> ServiceResult<()>
where
    R: StationReader + StationWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.get_station_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form
        .to_updates()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.update_station(form.id, user.org_id, &updates).map_err(|err| {
        log::error!("Failed to update station: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "station.updated")
            .entity("station", updated.id),
    );

    Ok(())
}
