//! DTOs for the customers screens.

use serde::{Deserialize, Serialize};

use crate::domain::billing::Payment;
use crate::domain::customer::Customer;
use crate::domain::package::Package;
use crate::domain::station::Station;
use crate::domain::ticket::Ticket;
use crate::pagination::Paginated;

/// Query parameters accepted by the customers index page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub status: Option<String>,
    pub package: Option<i32>,
}

/// Data required to render the customers index template.
#[derive(Debug, Serialize)]
pub struct CustomersPageData {
    pub customers: Paginated<Customer>,
    /// Packages for the filter dropdown and the add form.
    pub packages: Vec<Package>,
    pub stations: Vec<Station>,
    pub search_query: Option<String>,
    pub status_filter: Option<String>,
    pub package_filter: Option<i32>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Aggregated data required to render the customer details page.
#[derive(Debug, Serialize)]
pub struct CustomerPageData {
    pub customer: Customer,
    pub package: Option<Package>,
    pub station: Option<Station>,
    pub packages: Vec<Package>,
    pub stations: Vec<Station>,
    /// Most recent payments, newest first.
    pub payments: Vec<Payment>,
    pub tickets: Vec<Ticket>,
}
