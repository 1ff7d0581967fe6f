//! Services backing the payments and transactions screens.

use uuid::Uuid;
use validator::Validate;

use crate::collection::{FilterState, SortDirection};
use crate::domain::activity::NewActivity;
use crate::domain::billing::{NewPayment, PaymentMethod, TransactionProvider, TransactionStatus};
use crate::dto::billing::{
    PaymentsPageData, PaymentsQuery, TransactionsPageData, TransactionsQuery,
};
use crate::forms::billing::RecordPaymentForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    ActivityWriter, CustomerReader, PaymentListQuery, PaymentReader, PaymentSortBy, PaymentWriter,
    TransactionListQuery, TransactionReader, TransactionSortBy,
};
use crate::services::{ServiceError, ServiceResult, fetch_clamped, record_activity};
use crate::SERVICE_ACCESS_ROLE;

/// Loads one page of the payments ledger.
pub fn load_payments_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PaymentsQuery,
) -> ServiceResult<PaymentsPageData>
where
    R: PaymentReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(PaymentSortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Descending);
            (by, dir)
        });
    let method = query
        .method
        .as_deref()
        .and_then(|s| PaymentMethod::try_from(s).ok());

    let mut state =
        FilterState::from_params(query.page, query.per_page, query.q.clone(), sort, method);

    let search = state.search.clone();
    let (total, payments) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = PaymentListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(method) = method {
            list_query = list_query.method(method);
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_payments(list_query)
    })?;

    Ok(PaymentsPageData {
        payments: Paginated::new(payments, state.page(), state.per_page(), total),
        search_query: state.search.clone(),
        method_filter: method.map(|m| m.to_string()),
        sort: query.sort,
        dir: query.dir,
    })
}

/// Entity-specific filters of the transactions list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionFilters {
    pub provider: Option<TransactionProvider>,
    pub status: Option<TransactionStatus>,
}

/// Loads one page of the provider transactions list.
pub fn load_transactions_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: TransactionsQuery,
) -> ServiceResult<TransactionsPageData>
where
    R: TransactionReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let sort = query
        .sort
        .as_deref()
        .and_then(TransactionSortBy::from_param)
        .map(|by| {
            let dir = query
                .dir
                .as_deref()
                .and_then(SortDirection::from_param)
                .unwrap_or(SortDirection::Descending);
            (by, dir)
        });
    let filters = TransactionFilters {
        provider: query
            .provider
            .as_deref()
            .and_then(|s| TransactionProvider::try_from(s).ok()),
        status: query
            .status
            .as_deref()
            .and_then(|s| TransactionStatus::try_from(s).ok()),
    };

    let mut state = FilterState::from_params(
        query.page,
        query.per_page,
        query.q.clone(),
        sort,
        filters.clone(),
    );

    let search = state.search.clone();
    let (total, transactions) = fetch_clamped(&mut state, |page, per_page| {
        let mut list_query = TransactionListQuery::new(user.org_id).paginate(page, per_page);
        if let Some(term) = &search {
            list_query = list_query.search(term.clone());
        }
        if let Some(provider) = filters.provider {
            list_query = list_query.provider(provider);
        }
        if let Some(status) = filters.status {
            list_query = list_query.status(status);
        }
        if let Some((by, dir)) = sort {
            list_query = list_query.sort(by, dir);
        }
        repo.list_transactions(list_query)
    })?;

    Ok(TransactionsPageData {
        transactions: Paginated::new(transactions, state.page(), state.per_page(), total),
        search_query: state.search.clone(),
        provider_filter: filters.provider.map(|p| p.to_string()),
        status_filter: filters.status.map(|s| s.to_string()),
        sort: query.sort,
        dir: query.dir,
    })
}

/// Records a payment against a customer account.
///
/// When the form names a provider transaction, the transaction must exist
/// in the same organization and not be confirmed already; recording then
/// also reconciles it.
pub fn record_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordPaymentForm,
) -> ServiceResult<()>
where
    R: CustomerReader + TransactionReader + PaymentWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let method = form
        .method()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    let amount = form
        .amount_cents()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let customer = repo
        .get_customer_by_id(form.customer_id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(transaction_id) = form.transaction_id {
        let transaction = repo
            .get_transaction_by_id(transaction_id, user.org_id)?
            .ok_or(ServiceError::NotFound)?;
        if transaction.status == TransactionStatus::Confirmed {
            return Err(ServiceError::Form(
                "Transaction is already reconciled".to_string(),
            ));
        }
    }

    let payment = NewPayment {
        org_id: user.org_id,
        customer_id: customer.id,
        transaction_id: form.transaction_id,
        method,
        amount,
        receipt: Uuid::new_v4().to_string(),
        note: form.note(),
    };

    let created = repo.record_payment(&payment).map_err(|err| {
        log::error!("Failed to record payment: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "payment.recorded")
            .entity("customer", customer.id)
            .detail(created.receipt),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn clerk() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "3".into(),
            email: "clerk@example.com".into(),
            name: "Clerk".into(),
            org_id: 1,
            roles: vec![SERVICE_ACCESS_ROLE.into()],
            exp: 0,
        }
    }

    #[test]
    fn zero_amount_is_rejected_before_any_write() {
        let mut repo = MockRepository::new();
        repo.expect_record_payment().times(0);

        let form = RecordPaymentForm {
            customer_id: 1,
            transaction_id: None,
            method: "cash".into(),
            amount: "0".into(),
            note: None,
        };
        assert!(matches!(
            record_payment(&repo, &clerk(), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn already_confirmed_transaction_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|id, org_id| {
            Ok(Some(crate::domain::customer::Customer {
                id,
                org_id,
                name: "Jane".into(),
                ..Default::default()
            }))
        });
        repo.expect_get_transaction_by_id().returning(|id, org_id| {
            Ok(Some(crate::domain::billing::Transaction {
                id,
                org_id,
                provider: TransactionProvider::Mpesa,
                reference: "RKT1".into(),
                phone: "+254712345678".into(),
                amount: 100_000,
                status: TransactionStatus::Confirmed,
                customer_id: None,
                created_at: chrono::Utc::now().naive_utc(),
            }))
        });
        repo.expect_record_payment().times(0);

        let form = RecordPaymentForm {
            customer_id: 1,
            transaction_id: Some(9),
            method: "mpesa".into(),
            amount: "1000".into(),
            note: None,
        };
        assert!(matches!(
            record_payment(&repo, &clerk(), form),
            Err(ServiceError::Form(_))
        ));
    }
}
