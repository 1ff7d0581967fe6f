//! Repository implementation for transactions and the payment ledger.

use std::collections::{HashMap, HashSet};

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::billing::{NewPayment, NewTransaction, Payment, Transaction, TransactionStatus};
use crate::domain::customer::Customer;
use crate::models::billing::{
    NewPayment as DbNewPayment, NewTransaction as DbNewTransaction, Payment as DbPayment,
    Transaction as DbTransaction,
};
use crate::models::customer::Customer as DbCustomer;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, PaymentListQuery, PaymentReader, PaymentSortBy, PaymentWriter,
    TransactionListQuery, TransactionReader, TransactionSortBy, TransactionWriter,
};

impl TransactionReader for DieselRepository {
    fn get_transaction_by_id(
        &self,
        id: i32,
        org_id: i32,
    ) -> RepositoryResult<Option<Transaction>> {
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let tx = transactions::table
            .filter(transactions::id.eq(id))
            .filter(transactions::org_id.eq(org_id))
            .first::<DbTransaction>(&mut conn)
            .optional()?;

        match tx {
            Some(tx) => Ok(Some(
                Transaction::try_from(tx).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<Transaction>)> {
        use crate::schema::transactions;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = transactions::table
                .filter(transactions::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(provider) = query.provider {
                items = items.filter(transactions::provider.eq(provider.to_string()));
            }
            if let Some(status) = query.status {
                items = items.filter(transactions::status.eq(status.to_string()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    transactions::reference
                        .like(pattern.clone())
                        .or(transactions::phone.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((TransactionSortBy::CreatedAt, SortDirection::Descending));
        let mut items = match (by, dir) {
            (TransactionSortBy::Amount, SortDirection::Ascending) => {
                build().order(transactions::amount.asc())
            }
            (TransactionSortBy::Amount, SortDirection::Descending) => {
                build().order(transactions::amount.desc())
            }
            (TransactionSortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(transactions::created_at.asc())
            }
            (TransactionSortBy::CreatedAt, SortDirection::Descending) => {
                build().order(transactions::created_at.desc())
            }
        }
        .then_order_by(transactions::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let transactions = items
            .load::<DbTransaction>(&mut conn)?
            .into_iter()
            .map(|t| Transaction::try_from(t).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, transactions))
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> RepositoryResult<Transaction> {
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let db_new: DbNewTransaction = new_transaction.into();

        let created = diesel::insert_into(transactions::table)
            .values(&db_new)
            .get_result::<DbTransaction>(&mut conn)?;

        Transaction::try_from(created).map_err(RepositoryError::from)
    }
}

impl PaymentReader for DieselRepository {
    fn list_payments(
        &self,
        query: PaymentListQuery,
    ) -> RepositoryResult<(usize, Vec<(Payment, Customer)>)> {
        use crate::schema::{customers, payments};

        let mut conn = self.conn()?;

        let build = || {
            let mut items = payments::table
                .filter(payments::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(method) = query.method {
                items = items.filter(payments::method.eq(method.to_string()));
            }
            if let Some(customer_id) = query.customer_id {
                items = items.filter(payments::customer_id.eq(customer_id));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    payments::receipt
                        .like(pattern.clone())
                        .nullable()
                        .or(payments::note.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((PaymentSortBy::CreatedAt, SortDirection::Descending));
        let mut items = match (by, dir) {
            (PaymentSortBy::Amount, SortDirection::Ascending) => {
                build().order(payments::amount.asc())
            }
            (PaymentSortBy::Amount, SortDirection::Descending) => {
                build().order(payments::amount.desc())
            }
            (PaymentSortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(payments::created_at.asc())
            }
            (PaymentSortBy::CreatedAt, SortDirection::Descending) => {
                build().order(payments::created_at.desc())
            }
        }
        .then_order_by(payments::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_payments = items.load::<DbPayment>(&mut conn)?;

        let customer_ids: Vec<i32> = {
            let set: HashSet<i32> = db_payments.iter().map(|p| p.customer_id).collect();
            set.into_iter().collect()
        };
        let db_customers = customers::table
            .filter(customers::id.eq_any(customer_ids))
            .load::<DbCustomer>(&mut conn)?;
        let customer_map: HashMap<i32, DbCustomer> =
            db_customers.into_iter().map(|c| (c.id, c)).collect();

        let combined = db_payments
            .into_iter()
            .filter_map(|payment| {
                customer_map
                    .get(&payment.customer_id)
                    .cloned()
                    .map(|customer| (payment, customer))
            })
            .map(|(payment, customer)| {
                Ok((
                    Payment::try_from(payment).map_err(RepositoryError::from)?,
                    Customer::try_from(customer).map_err(RepositoryError::from)?,
                ))
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok((total, combined))
    }

    fn list_customer_payments(
        &self,
        customer_id: i32,
        org_id: i32,
        limit: usize,
    ) -> RepositoryResult<Vec<Payment>> {
        use crate::schema::payments;

        let mut conn = self.conn()?;
        let payments = payments::table
            .filter(payments::org_id.eq(org_id))
            .filter(payments::customer_id.eq(customer_id))
            .order(payments::created_at.desc())
            .limit(limit as i64)
            .load::<DbPayment>(&mut conn)?
            .into_iter()
            .map(|p| Payment::try_from(p).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(payments)
    }
}

impl PaymentWriter for DieselRepository {
    fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment> {
        use crate::schema::{customers, payments, transactions};

        let mut conn = self.conn()?;
        let db_new: DbNewPayment = payment.into();

        let created = conn.transaction::<DbPayment, diesel::result::Error, _>(|conn| {
            let created = diesel::insert_into(payments::table)
                .values(&db_new)
                .get_result::<DbPayment>(conn)?;

            diesel::update(
                customers::table
                    .filter(customers::id.eq(payment.customer_id))
                    .filter(customers::org_id.eq(payment.org_id)),
            )
            .set(customers::balance.eq(customers::balance + payment.amount))
            .execute(conn)?;

            if let Some(transaction_id) = payment.transaction_id {
                diesel::update(
                    transactions::table
                        .filter(transactions::id.eq(transaction_id))
                        .filter(transactions::org_id.eq(payment.org_id)),
                )
                .set((
                    transactions::status.eq(TransactionStatus::Confirmed.to_string()),
                    transactions::customer_id.eq(payment.customer_id),
                ))
                .execute(conn)?;
            }

            Ok(created)
        })?;

        Payment::try_from(created).map_err(RepositoryError::from)
    }
}
