//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::billing::{NewPayment, NewTransaction, Payment, Transaction};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::inventory::{InventoryItem, NewInventoryItem};
use crate::domain::package::{NewPackage, Package, UpdatePackage};
use crate::domain::station::{NewStation, Station, UpdateStation};
use crate::domain::ticket::{NewTicket, Ticket, TicketStatus};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, CustomerListQuery, CustomerReader,
    CustomerWriter, InventoryListQuery, InventoryReader, InventoryWriter, PackageReader,
    PackageWriter, PaymentListQuery, PaymentReader, PaymentWriter, StationListQuery, StationReader,
    StationWriter, TicketListQuery, TicketReader, TicketWriter, TransactionListQuery,
    TransactionReader, TransactionWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
        fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
        fn update_customer(
            &self,
            id: i32,
            org_id: i32,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: i32, org_id: i32) -> RepositoryResult<()>;
    }

    impl PackageReader for Repository {
        fn get_package_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Package>>;
        fn list_packages(&self, org_id: i32) -> RepositoryResult<Vec<Package>>;
    }

    impl PackageWriter for Repository {
        fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package>;
        fn update_package(
            &self,
            id: i32,
            org_id: i32,
            updates: &UpdatePackage,
        ) -> RepositoryResult<Package>;
    }

    impl StationReader for Repository {
        fn get_station_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Station>>;
        fn list_stations(&self, query: StationListQuery) -> RepositoryResult<(usize, Vec<Station>)>;
    }

    impl StationWriter for Repository {
        fn create_station(&self, new_station: &NewStation) -> RepositoryResult<Station>;
        fn update_station(
            &self,
            id: i32,
            org_id: i32,
            updates: &UpdateStation,
        ) -> RepositoryResult<Station>;
    }

    impl TicketReader for Repository {
        fn get_ticket_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Ticket>>;
        fn list_tickets(
            &self,
            query: TicketListQuery,
        ) -> RepositoryResult<(usize, Vec<(Ticket, Customer)>)>;
    }

    impl TicketWriter for Repository {
        fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<Ticket>;
        fn update_ticket_status<'a>(
            &self,
            id: i32,
            org_id: i32,
            status: TicketStatus,
            assigned_to: Option<&'a str>,
        ) -> RepositoryResult<Ticket>;
    }

    impl TransactionReader for Repository {
        fn get_transaction_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Transaction>>;
        fn list_transactions(
            &self,
            query: TransactionListQuery,
        ) -> RepositoryResult<(usize, Vec<Transaction>)>;
    }

    impl TransactionWriter for Repository {
        fn create_transaction(&self, new_transaction: &NewTransaction) -> RepositoryResult<Transaction>;
    }

    impl PaymentReader for Repository {
        fn list_payments(
            &self,
            query: PaymentListQuery,
        ) -> RepositoryResult<(usize, Vec<(Payment, Customer)>)>;
        fn list_customer_payments(
            &self,
            customer_id: i32,
            org_id: i32,
            limit: usize,
        ) -> RepositoryResult<Vec<Payment>>;
    }

    impl PaymentWriter for Repository {
        fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment>;
    }

    impl InventoryReader for Repository {
        fn get_item_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<InventoryItem>>;
        fn list_inventory(
            &self,
            query: InventoryListQuery,
        ) -> RepositoryResult<(usize, Vec<InventoryItem>)>;
    }

    impl InventoryWriter for Repository {
        fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
        fn assign_item(
            &self,
            id: i32,
            org_id: i32,
            customer_id: Option<i32>,
        ) -> RepositoryResult<InventoryItem>;
    }

    impl ActivityReader for Repository {
        fn list_activity(&self, query: ActivityListQuery) -> RepositoryResult<(usize, Vec<Activity>)>;
        fn recent_activity(&self, org_id: i32, limit: usize) -> RepositoryResult<Vec<Activity>>;
    }

    impl ActivityWriter for Repository {
        fn log_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
    }
}
