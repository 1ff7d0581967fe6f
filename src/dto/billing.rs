//! DTOs for the payments and transactions screens.

use serde::{Deserialize, Serialize};

use crate::domain::billing::{Payment, Transaction};
use crate::domain::customer::Customer;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct PaymentsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentsPageData {
    /// Payments joined with the paying customer.
    pub payments: Paginated<(Payment, Customer)>,
    pub search_query: Option<String>,
    pub method_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub provider: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsPageData {
    pub transactions: Paginated<Transaction>,
    pub search_query: Option<String>,
    pub provider_filter: Option<String>,
    pub status_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
