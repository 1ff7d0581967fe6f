//! Provider transactions and the payment ledger.
//!
//! A `Transaction` is the raw record a payment provider reported; a
//! `Payment` is the ledger entry that credits a customer account. The two
//! are linked when a transaction is reconciled.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionProvider {
    Mpesa,
    KopoKopo,
}

impl TransactionProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mpesa => "mpesa",
            Self::KopoKopo => "kopokopo",
        }
    }
}

impl std::fmt::Display for TransactionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TransactionProvider {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "mpesa" => Ok(Self::Mpesa),
            "kopokopo" => Ok(Self::KopoKopo),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "failed" => Ok(Self::Failed),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub org_id: i32,
    pub provider: TransactionProvider,
    /// Provider-side reference (e.g. an M-Pesa receipt code).
    pub reference: String,
    /// Payer phone number as reported by the provider.
    pub phone: String,
    /// Amount in cents.
    pub amount: i64,
    pub status: TransactionStatus,
    /// Customer the transaction has been matched to, if any.
    pub customer_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTransaction {
    pub org_id: i32,
    pub provider: TransactionProvider,
    pub reference: String,
    pub phone: String,
    pub amount: i64,
    pub status: TransactionStatus,
    pub customer_id: Option<i32>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Mpesa,
    KopoKopo,
    #[default]
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mpesa => "mpesa",
            Self::KopoKopo => "kopokopo",
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "mpesa" => Ok(Self::Mpesa),
            "kopokopo" => Ok(Self::KopoKopo),
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub org_id: i32,
    pub customer_id: i32,
    pub transaction_id: Option<i32>,
    pub method: PaymentMethod,
    /// Amount in cents.
    pub amount: i64,
    /// Receipt number handed to the customer.
    pub receipt: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewPayment {
    pub org_id: i32,
    pub customer_id: i32,
    pub transaction_id: Option<i32>,
    pub method: PaymentMethod,
    pub amount: i64,
    pub receipt: String,
    pub note: Option<String>,
}
