//! Diesel models for provider transactions and the payment ledger.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::billing::{
    NewPayment as DomainNewPayment, NewTransaction as DomainNewTransaction,
    Payment as DomainPayment, PaymentMethod, Transaction as DomainTransaction, TransactionProvider,
    TransactionStatus,
};
use crate::domain::types::TypeConstraintError;
use crate::models::customer::Customer;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::transactions)]
pub struct Transaction {
    pub id: i32,
    pub org_id: i32,
    pub provider: String,
    pub reference: String,
    pub phone: String,
    pub amount: i64,
    pub status: String,
    pub customer_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub org_id: i32,
    pub provider: String,
    pub reference: &'a str,
    pub phone: &'a str,
    pub amount: i64,
    pub status: String,
    pub customer_id: Option<i32>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: i32,
    pub org_id: i32,
    pub customer_id: i32,
    pub transaction_id: Option<i32>,
    pub method: String,
    pub amount: i64,
    pub receipt: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub org_id: i32,
    pub customer_id: i32,
    pub transaction_id: Option<i32>,
    pub method: String,
    pub amount: i64,
    pub receipt: &'a str,
    pub note: Option<&'a str>,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tx.id,
            org_id: tx.org_id,
            provider: TransactionProvider::try_from(tx.provider.as_str())?,
            reference: tx.reference,
            phone: tx.phone,
            amount: tx.amount,
            status: TransactionStatus::try_from(tx.status.as_str())?,
            customer_id: tx.customer_id,
            created_at: tx.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewTransaction> for NewTransaction<'a> {
    fn from(tx: &'a DomainNewTransaction) -> Self {
        Self {
            org_id: tx.org_id,
            provider: tx.provider.to_string(),
            reference: tx.reference.as_str(),
            phone: tx.phone.as_str(),
            amount: tx.amount,
            status: tx.status.to_string(),
            customer_id: tx.customer_id,
        }
    }
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: payment.id,
            org_id: payment.org_id,
            customer_id: payment.customer_id,
            transaction_id: payment.transaction_id,
            method: PaymentMethod::try_from(payment.method.as_str())?,
            amount: payment.amount,
            receipt: payment.receipt,
            note: payment.note,
            created_at: payment.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPayment> for NewPayment<'a> {
    fn from(payment: &'a DomainNewPayment) -> Self {
        Self {
            org_id: payment.org_id,
            customer_id: payment.customer_id,
            transaction_id: payment.transaction_id,
            method: payment.method.to_string(),
            amount: payment.amount,
            receipt: payment.receipt.as_str(),
            note: payment.note.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn transaction_into_domain_parses_provider_and_status() {
        let db = Transaction {
            id: 1,
            org_id: 1,
            provider: "mpesa".into(),
            reference: "RKT12345".into(),
            phone: "+254712345678".into(),
            amount: 150_000,
            status: "pending".into(),
            customer_id: None,
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainTransaction::try_from(db).unwrap();
        assert_eq!(domain.provider, TransactionProvider::Mpesa);
        assert_eq!(domain.status, TransactionStatus::Pending);
    }

    #[test]
    fn payment_with_unknown_method_is_rejected() {
        let db = Payment {
            id: 1,
            org_id: 1,
            customer_id: 3,
            transaction_id: None,
            method: "barter".into(),
            amount: 100,
            receipt: "r-1".into(),
            note: None,
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainPayment::try_from(db).is_err());
    }
}
