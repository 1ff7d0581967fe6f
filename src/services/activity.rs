//! Services backing the activity log screen.

use crate::collection::{FilterState, SortDirection};
use crate::dto::activity::{ActivityPageData, ActivityQuery};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{ActivityListQuery, ActivityReader, ActivitySortBy};
use crate::services::{ServiceError, ServiceResult, fetch_clamped};
use crate::SERVICE_ADMIN_ROLE;

const RECENT_LIMIT: usize = 5;

/// Loads one page of the audit trail; the log is admin-only.
pub fn load_activity_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ActivityQuery,
) -> ServiceResult<ActivityPageData>
where
    R: ActivityReader + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(ActivitySortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Descending);
            (by, dir)
        });
    let action = query
        .action
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut state = FilterState::from_params(
        query.page,
        query.per_page,
        query.q.clone(),
        sort,
        action.clone(),
    );

    let search = state.search.clone();
    let (total, entries) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = ActivityListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(action) = &action {
            list_query = list_query.action(action.clone());
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_activity(list_query)
    })?;

    // The recent feed reports no total of its own; its length is the only
    // count available.
    let recent = repo.recent_activity(user.org_id, RECENT_LIMIT)?;
    let recent_count = recent.len();

    Ok(ActivityPageData {
        activity: Paginated::new(entries, state.page(), state.per_page(), total),
        recent,
        recent_count,
        search_query: state.search.clone(),
        action_filter: action,
        sort: query.sort,
        dir: query.dir,
    })
}
