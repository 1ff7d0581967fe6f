//! Service layer: authorization, parameter normalization, and orchestration
//! between forms, repositories, and page data.

use thiserror::Error;

use crate::collection::FilterState;
use crate::domain::activity::NewActivity;
use crate::domain::types::TypeConstraintError;
use crate::repository::ActivityWriter;
use crate::repository::errors::RepositoryError;

pub mod activity;
pub mod api;
pub mod billing;
pub mod customers;
pub mod inventory;
pub mod packages;
pub mod stations;
pub mod tickets;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Runs a paginated fetch, then re-fetches once if the reported total
/// proves the requested page out of range. Keeps the filter-state page
/// invariant without ever surfacing an error for a stale page number.
pub(crate) fn fetch_clamped<T, S, F, E>(
    state: &mut FilterState<S, F>,
    mut fetch: impl FnMut(usize, usize) -> Result<(usize, Vec<T>), E>,
) -> Result<(usize, Vec<T>), E> {
    let (total, rows) = fetch(state.page(), state.per_page())?;
    if state.clamp_to(total) {
        return fetch(state.page(), state.per_page());
    }
    Ok((total, rows))
}

/// Writes an audit-trail entry; failures are logged and swallowed so a
/// broken log never fails the user's action.
pub(crate) fn record_activity<R>(repo: &R, activity: &NewActivity)
where
    R: ActivityWriter + ?Sized,
{
    if let Err(err) = repo.log_activity(activity) {
        log::warn!("Failed to record activity: {err}");
    }
}
