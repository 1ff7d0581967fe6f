//! Repository traits and query builders.
//!
//! Every list operation takes a query struct built with the fluent methods
//! below and returns `(total, rows)`: the total row count across all pages
//! and the requested page, with search, filters, sort, and pagination all
//! applied server-side.

use crate::collection::SortDirection;
use crate::db::{DbConnection, DbPool};
use crate::domain::activity::{Activity, NewActivity};
use crate::domain::billing::{
    NewPayment, NewTransaction, Payment, PaymentMethod, Transaction, TransactionProvider,
    TransactionStatus,
};
use crate::domain::customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::inventory::{InventoryCategory, InventoryItem, InventoryStatus, NewInventoryItem};
use crate::domain::package::{NewPackage, Package, UpdatePackage};
use crate::domain::station::{NewStation, Station, StationStatus, UpdateStation};
use crate::domain::ticket::{NewTicket, Ticket, TicketPriority, TicketStatus};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod activity;
pub mod billing;
pub mod customer;
pub mod errors;
pub mod inventory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod package;
pub mod station;
pub mod ticket;

/// Diesel-backed implementation of all repository traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub(crate) fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub(crate) fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

macro_rules! sort_by {
    ($name:ident { $($variant:ident => $param:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parses the `sort` query parameter.
            pub fn from_param(value: &str) -> Option<Self> {
                match value {
                    $($param => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn as_param(self) -> &'static str {
                match self {
                    $(Self::$variant => $param),+
                }
            }
        }
    };
}

sort_by!(CustomerSortBy {
    Name => "name",
    Status => "status",
    Balance => "balance",
    CreatedAt => "created_at",
});

sort_by!(StationSortBy {
    Name => "name",
    Status => "status",
    CreatedAt => "created_at",
});

sort_by!(TicketSortBy {
    Status => "status",
    Priority => "priority",
    UpdatedAt => "updated_at",
    CreatedAt => "created_at",
});

sort_by!(TransactionSortBy {
    Amount => "amount",
    CreatedAt => "created_at",
});

sort_by!(PaymentSortBy {
    Amount => "amount",
    CreatedAt => "created_at",
});

sort_by!(InventorySortBy {
    Name => "name",
    Category => "category",
    Status => "status",
    CreatedAt => "created_at",
});

sort_by!(ActivitySortBy {
    Actor => "actor",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub package_id: Option<i32>,
    pub sort: Option<(CustomerSortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            status: None,
            package_id: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn package(mut self, package_id: i32) -> Self {
        self.package_id = Some(package_id);
        self
    }

    pub fn sort(mut self, by: CustomerSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct StationListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub status: Option<StationStatus>,
    pub sort: Option<(StationSortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl StationListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            status: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: StationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, by: StationSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct TicketListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    /// Restricts to tickets assigned to this agent email.
    pub assigned_to: Option<String>,
    pub customer_id: Option<i32>,
    pub sort: Option<(TicketSortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl TicketListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            status: None,
            priority: None,
            assigned_to: None,
            customer_id: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn assigned_to(mut self, email: impl Into<String>) -> Self {
        self.assigned_to = Some(email.into());
        self
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn sort(mut self, by: TicketSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct TransactionListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub provider: Option<TransactionProvider>,
    pub status: Option<TransactionStatus>,
    pub sort: Option<(TransactionSortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl TransactionListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            provider: None,
            status: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn provider(mut self, provider: TransactionProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, by: TransactionSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct PaymentListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub method: Option<PaymentMethod>,
    pub customer_id: Option<i32>,
    pub sort: Option<(PaymentSortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl PaymentListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            method: None,
            customer_id: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn sort(mut self, by: PaymentSortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct InventoryListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub category: Option<InventoryCategory>,
    pub status: Option<InventoryStatus>,
    pub sort: Option<(InventorySortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl InventoryListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            category: None,
            status: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: InventoryCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn status(mut self, status: InventoryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn sort(mut self, by: InventorySortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct ActivityListQuery {
    pub org_id: i32,
    pub search: Option<String>,
    pub action: Option<String>,
    pub sort: Option<(ActivitySortBy, SortDirection)>,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new(org_id: i32) -> Self {
        Self {
            org_id,
            search: None,
            action: None,
            sort: None,
            pagination: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn sort(mut self, by: ActivitySortBy, direction: SortDirection) -> Self {
        self.sort = Some((by, direction));
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    fn update_customer(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: i32, org_id: i32) -> RepositoryResult<()>;
}

pub trait PackageReader {
    fn get_package_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Package>>;
    fn list_packages(&self, org_id: i32) -> RepositoryResult<Vec<Package>>;
}

pub trait PackageWriter {
    fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package>;
    fn update_package(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdatePackage,
    ) -> RepositoryResult<Package>;
}

pub trait StationReader {
    fn get_station_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Station>>;
    fn list_stations(&self, query: StationListQuery) -> RepositoryResult<(usize, Vec<Station>)>;
}

pub trait StationWriter {
    fn create_station(&self, new_station: &NewStation) -> RepositoryResult<Station>;
    fn update_station(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdateStation,
    ) -> RepositoryResult<Station>;
}

pub trait TicketReader {
    fn get_ticket_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Ticket>>;
    /// Tickets joined with the customer they belong to.
    fn list_tickets(
        &self,
        query: TicketListQuery,
    ) -> RepositoryResult<(usize, Vec<(Ticket, Customer)>)>;
}

pub trait TicketWriter {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
    fn update_ticket_status(
        &self,
        id: i32,
        org_id: i32,
        status: TicketStatus,
        assigned_to: Option<&str>,
    ) -> RepositoryResult<Ticket>;
}

pub trait TransactionReader {
    fn get_transaction_by_id(&self, id: i32, org_id: i32)
    -> RepositoryResult<Option<Transaction>>;
    fn list_transactions(
        &self,
        query: TransactionListQuery,
    ) -> RepositoryResult<(usize, Vec<Transaction>)>;
}

pub trait TransactionWriter {
    fn create_transaction(&self, new_transaction: &NewTransaction)
    -> RepositoryResult<Transaction>;
}

pub trait PaymentReader {
    /// Payments joined with the paying customer.
    fn list_payments(
        &self,
        query: PaymentListQuery,
    ) -> RepositoryResult<(usize, Vec<(Payment, Customer)>)>;
    /// Most recent payments of one customer, newest first.
    fn list_customer_payments(
        &self,
        customer_id: i32,
        org_id: i32,
        limit: usize,
    ) -> RepositoryResult<Vec<Payment>>;
}

pub trait PaymentWriter {
    /// Records a payment, credits the customer balance, and confirms the
    /// matched provider transaction, all in one database transaction.
    fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment>;
}

pub trait InventoryReader {
    fn get_item_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<InventoryItem>>;
    fn list_inventory(
        &self,
        query: InventoryListQuery,
    ) -> RepositoryResult<(usize, Vec<InventoryItem>)>;
}

pub trait InventoryWriter {
    fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
    /// Hands an item to a customer, or returns it to stock when
    /// `customer_id` is `None`.
    fn assign_item(
        &self,
        id: i32,
        org_id: i32,
        customer_id: Option<i32>,
    ) -> RepositoryResult<InventoryItem>;
}

pub trait ActivityReader {
    fn list_activity(&self, query: ActivityListQuery) -> RepositoryResult<(usize, Vec<Activity>)>;
    /// Latest entries without a total count; callers that need one fall
    /// back to the slice length.
    fn recent_activity(&self, org_id: i32, limit: usize) -> RepositoryResult<Vec<Activity>>;
}

pub trait ActivityWriter {
    fn log_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
}
