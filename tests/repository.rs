use netdesk::collection::SortDirection;
use netdesk::domain::billing::{
    NewPayment, NewTransaction, PaymentMethod, TransactionProvider, TransactionStatus,
};
use netdesk::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use netdesk::domain::inventory::{InventoryCategory, NewInventoryItem};
use netdesk::domain::package::NewPackage;
use netdesk::domain::station::{NewStation, StationStatus, UpdateStation};
use netdesk::domain::ticket::{NewTicket, TicketPriority, TicketStatus};
use netdesk::domain::activity::NewActivity;
use netdesk::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, CustomerListQuery, CustomerReader,
    CustomerSortBy, CustomerWriter, InventoryListQuery, InventoryReader, InventoryWriter,
    PackageReader, PackageWriter, PaymentListQuery, PaymentReader, PaymentWriter,
    StationListQuery, StationReader, StationWriter, TicketListQuery, TicketReader, TicketWriter,
    TransactionListQuery, TransactionReader, TransactionWriter,
};

mod common;

fn customer(org_id: i32, name: &str) -> NewCustomer {
    NewCustomer::new(
        org_id,
        name.to_string(),
        Some(format!("{}@example.com", name.to_lowercase())),
        None,
        None,
        None,
        None,
    )
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = test_db.repo();

    assert_eq!(
        repo.create_customers(&[customer(1, "Alice"), customer(1, "Bob"), customer(2, "Eve")])
            .unwrap(),
        3
    );

    // Listing is scoped to the organization.
    let (total, items) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (search_total, search_items) = repo
        .list_customers(CustomerListQuery::new(1).search("Bob"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_items[0].name, "Bob");
    let bob = search_items[0].clone();

    let updates = UpdateCustomer::new(
        "Bobby".to_string(),
        bob.email.clone(),
        None,
        None,
        CustomerStatus::Suspended,
        None,
        None,
    );
    let updated = repo.update_customer(bob.id, 1, &updates).unwrap();
    assert_eq!(updated.name, "Bobby");
    assert_eq!(updated.status, CustomerStatus::Suspended);

    let (suspended_total, _) = repo
        .list_customers(CustomerListQuery::new(1).status(CustomerStatus::Suspended))
        .unwrap();
    assert_eq!(suspended_total, 1);

    // Cross-org reads come back empty.
    assert!(repo.get_customer_by_id(bob.id, 2).unwrap().is_none());

    repo.delete_customer(bob.id, 1).unwrap();
    assert!(repo.get_customer_by_id(bob.id, 1).unwrap().is_none());

    let (total_after, _) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    assert_eq!(total_after, 1);
}

#[test]
fn test_customer_list_pagination_and_sort() {
    let test_db = common::TestDb::new("test_customer_list_pagination.db");
    let repo = test_db.repo();

    let customers: Vec<NewCustomer> = (1..=47)
        .map(|i| customer(1, &format!("Customer{i:02}")))
        .collect();
    repo.create_customers(&customers).unwrap();

    // Page 5 of 47 rows at 10 per page holds the tail 7 rows.
    let (total, page5) = repo
        .list_customers(CustomerListQuery::new(1).paginate(5, 10))
        .unwrap();
    assert_eq!(total, 47);
    assert_eq!(page5.len(), 7);

    // A page past the end still reports the real total.
    let (total, beyond) = repo
        .list_customers(CustomerListQuery::new(1).paginate(9, 10))
        .unwrap();
    assert_eq!(total, 47);
    assert!(beyond.is_empty());

    let (_, by_name_desc) = repo
        .list_customers(
            CustomerListQuery::new(1)
                .sort(CustomerSortBy::Name, SortDirection::Descending)
                .paginate(1, 10),
        )
        .unwrap();
    assert_eq!(by_name_desc[0].name, "Customer47");
}

#[test]
fn test_ticket_repository() {
    let test_db = common::TestDb::new("test_ticket_repository.db");
    let repo = test_db.repo();

    repo.create_customers(&[customer(1, "Alice")]).unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    let alice = &customers[0];

    let t1 = NewTicket::new(
        1,
        alice.id,
        "No connection".to_string(),
        "Link down since morning".to_string(),
        TicketPriority::High,
        Some("agent@example.com".to_string()),
    )
    .unwrap();
    let t2 = NewTicket::new(
        1,
        alice.id,
        "Slow speeds".to_string(),
        "Evening congestion".to_string(),
        TicketPriority::Normal,
        None,
    )
    .unwrap();
    let created = repo.create_ticket(&t1).unwrap();
    repo.create_ticket(&t2).unwrap();
    assert_eq!(created.status, TicketStatus::Open);

    let (total, rows) = repo.list_tickets(TicketListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows[0].1.id, alice.id);

    let (high_total, high) = repo
        .list_tickets(TicketListQuery::new(1).priority(TicketPriority::High))
        .unwrap();
    assert_eq!(high_total, 1);
    assert_eq!(high[0].0.subject, "No connection");

    let (assigned_total, _) = repo
        .list_tickets(TicketListQuery::new(1).assigned_to("agent@example.com"))
        .unwrap();
    assert_eq!(assigned_total, 1);

    let closed = repo
        .update_ticket_status(created.id, 1, TicketStatus::Closed, None)
        .unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);
    // Assignment survives a status-only update.
    assert_eq!(closed.assigned_to.as_deref(), Some("agent@example.com"));

    let (open_total, _) = repo
        .list_tickets(TicketListQuery::new(1).status(TicketStatus::Open))
        .unwrap();
    assert_eq!(open_total, 1);
}

#[test]
fn test_payment_credits_balance_and_reconciles_transaction() {
    let test_db = common::TestDb::new("test_payment_reconciliation.db");
    let repo = test_db.repo();

    repo.create_customers(&[customer(1, "Alice")]).unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    let alice = &customers[0];
    assert_eq!(alice.balance, 0);

    let tx = repo
        .create_transaction(&NewTransaction {
            org_id: 1,
            provider: TransactionProvider::Mpesa,
            reference: "RKT75XK1".to_string(),
            phone: "+254712345678".to_string(),
            amount: 250_000,
            status: TransactionStatus::Pending,
            customer_id: None,
        })
        .unwrap();

    let payment = repo
        .record_payment(&NewPayment {
            org_id: 1,
            customer_id: alice.id,
            transaction_id: Some(tx.id),
            method: PaymentMethod::Mpesa,
            amount: 250_000,
            receipt: "receipt-1".to_string(),
            note: Some("March invoice".to_string()),
        })
        .unwrap();
    assert_eq!(payment.amount, 250_000);

    let alice_after = repo.get_customer_by_id(alice.id, 1).unwrap().unwrap();
    assert_eq!(alice_after.balance, 250_000);

    let tx_after = repo.get_transaction_by_id(tx.id, 1).unwrap().unwrap();
    assert_eq!(tx_after.status, TransactionStatus::Confirmed);
    assert_eq!(tx_after.customer_id, Some(alice.id));

    let (total, rows) = repo.list_payments(PaymentListQuery::new(1)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].1.name, "Alice");

    let recent = repo.list_customer_payments(alice.id, 1, 5).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].receipt, "receipt-1");

    let (mpesa_total, _) = repo
        .list_payments(PaymentListQuery::new(1).method(PaymentMethod::Mpesa))
        .unwrap();
    assert_eq!(mpesa_total, 1);
    let (cash_total, _) = repo
        .list_payments(PaymentListQuery::new(1).method(PaymentMethod::Cash))
        .unwrap();
    assert_eq!(cash_total, 0);
}

#[test]
fn test_transaction_list_filters() {
    let test_db = common::TestDb::new("test_transaction_list_filters.db");
    let repo = test_db.repo();

    for (i, provider) in [TransactionProvider::Mpesa, TransactionProvider::KopoKopo]
        .into_iter()
        .enumerate()
    {
        repo.create_transaction(&NewTransaction {
            org_id: 1,
            provider,
            reference: format!("REF{i}"),
            phone: "+254700000000".to_string(),
            amount: 100_000,
            status: TransactionStatus::Pending,
            customer_id: None,
        })
        .unwrap();
    }

    let (total, _) = repo
        .list_transactions(TransactionListQuery::new(1))
        .unwrap();
    assert_eq!(total, 2);

    let (mpesa_total, mpesa) = repo
        .list_transactions(TransactionListQuery::new(1).provider(TransactionProvider::Mpesa))
        .unwrap();
    assert_eq!(mpesa_total, 1);
    assert_eq!(mpesa[0].reference, "REF0");

    let (search_total, _) = repo
        .list_transactions(TransactionListQuery::new(1).search("REF1"))
        .unwrap();
    assert_eq!(search_total, 1);
}

#[test]
fn test_station_and_package_repositories() {
    let test_db = common::TestDb::new("test_station_package.db");
    let repo = test_db.repo();

    let station = repo
        .create_station(&NewStation::new(
            1,
            "Hilltop Relay".to_string(),
            Some("Nakuru East".to_string()),
            Some("10.0.0.1".to_string()),
        ))
        .unwrap();
    assert_eq!(station.status, StationStatus::Offline);

    let updated = repo
        .update_station(
            station.id,
            1,
            &UpdateStation {
                name: station.name.clone(),
                location: station.location.clone(),
                ip_address: station.ip_address.clone(),
                status: StationStatus::Online,
            },
        )
        .unwrap();
    assert_eq!(updated.status, StationStatus::Online);

    let (online_total, _) = repo
        .list_stations(StationListQuery::new(1).status(StationStatus::Online))
        .unwrap();
    assert_eq!(online_total, 1);

    let basic = repo
        .create_package(&NewPackage {
            org_id: 1,
            name: "Home 10".to_string(),
            download_mbps: 10,
            upload_mbps: 5,
            monthly_fee: 150_000,
        })
        .unwrap();
    repo.create_package(&NewPackage {
        org_id: 1,
        name: "Home 30".to_string(),
        download_mbps: 30,
        upload_mbps: 10,
        monthly_fee: 300_000,
    })
    .unwrap();

    // Cheapest first.
    let packages = repo.list_packages(1).unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].id, basic.id);
}

#[test]
fn test_inventory_assignment_cycle() {
    let test_db = common::TestDb::new("test_inventory_assignment.db");
    let repo = test_db.repo();

    repo.create_customers(&[customer(1, "Alice")]).unwrap();
    let (_, customers) = repo.list_customers(CustomerListQuery::new(1)).unwrap();
    let alice = &customers[0];

    let item = repo
        .create_item(&NewInventoryItem::new(
            1,
            "TP-Link Archer".to_string(),
            InventoryCategory::Router,
            Some("SN-001".to_string()),
        ))
        .unwrap();
    assert_eq!(item.status.to_string(), "in_stock");

    let assigned = repo.assign_item(item.id, 1, Some(alice.id)).unwrap();
    assert_eq!(assigned.status.to_string(), "assigned");
    assert_eq!(assigned.customer_id, Some(alice.id));

    let returned = repo.assign_item(item.id, 1, None).unwrap();
    assert_eq!(returned.status.to_string(), "in_stock");
    assert_eq!(returned.customer_id, None);

    let (router_total, _) = repo
        .list_inventory(InventoryListQuery::new(1).category(InventoryCategory::Router))
        .unwrap();
    assert_eq!(router_total, 1);
}

#[test]
fn test_activity_log_and_recent_feed() {
    let test_db = common::TestDb::new("test_activity_log.db");
    let repo = test_db.repo();

    for i in 0..7 {
        repo.log_activity(
            &NewActivity::new(1, "admin@example.com", "customer.created")
                .detail(format!("Customer {i}")),
        )
        .unwrap();
    }
    repo.log_activity(&NewActivity::new(1, "clerk@example.com", "payment.recorded"))
        .unwrap();

    let (total, _) = repo.list_activity(ActivityListQuery::new(1)).unwrap();
    assert_eq!(total, 8);

    let (created_total, _) = repo
        .list_activity(ActivityListQuery::new(1).action("customer.created"))
        .unwrap();
    assert_eq!(created_total, 7);

    let (search_total, search_rows) = repo
        .list_activity(ActivityListQuery::new(1).search("clerk"))
        .unwrap();
    assert_eq!(search_total, 1);
    assert_eq!(search_rows[0].action, "payment.recorded");

    // The recent feed reports no total; it is just the newest slice.
    let recent = repo.recent_activity(1, 5).unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].action, "payment.recorded");
}
