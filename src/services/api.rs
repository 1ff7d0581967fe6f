//! Services backing the JSON API endpoints.

use crate::SERVICE_ACCESS_ROLE;
use crate::dto::api::{CustomersApiQuery, CustomersResponse};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{CustomerListQuery, CustomerReader};
use crate::services::{ServiceError, ServiceResult};

/// Returns the filtered list of customers visible to the authenticated user.
pub fn list_customers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CustomersApiQuery,
) -> ServiceResult<CustomersResponse>
where
    R: CustomerReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let mut query = CustomerListQuery::new(user.org_id);

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    let search = params
        .q
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = search {
        query = query.search(term);
    }

    let (total, customers) = repo.list_customers(query).map_err(ServiceError::from)?;

    Ok(CustomersResponse { total, customers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SERVICE_ADMIN_ROLE;
    use crate::repository::mock::MockRepository;

    #[test]
    fn search_term_is_trimmed_and_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_list_customers()
            .withf(|query| query.search.as_deref() == Some("alice") && query.pagination.is_none())
            .returning(|_| Ok((0, vec![])));

        let user = AuthenticatedUser {
            sub: "1".into(),
            email: "a@b.c".into(),
            name: "A".into(),
            org_id: 1,
            roles: vec![SERVICE_ACCESS_ROLE.into(), SERVICE_ADMIN_ROLE.into()],
            exp: 0,
        };
        let params = CustomersApiQuery {
            q: Some("  alice ".into()),
            page: None,
        };
        let response = list_customers(&repo, &user, params).unwrap();
        assert_eq!(response.total, 0);
        assert!(response.customers.is_empty());
    }
}
