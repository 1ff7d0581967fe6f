//! Repository implementation for customers.

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerSortBy, CustomerWriter, DieselRepository,
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::org_id.eq(org_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        match customer {
            Some(customer) => Ok(Some(
                Customer::try_from(customer).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = customers::table
                .filter(customers::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(customers::status.eq(status.to_string()));
            }
            if let Some(package_id) = query.package_id {
                items = items.filter(customers::package_id.eq(package_id));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    customers::name
                        .like(pattern.clone())
                        .nullable()
                        .or(customers::email.like(pattern.clone()))
                        .or(customers::phone.like(pattern.clone()))
                        .or(customers::address.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((CustomerSortBy::Name, SortDirection::Ascending));
        let mut items = match (by, dir) {
            (CustomerSortBy::Name, SortDirection::Ascending) => {
                build().order(customers::name.asc())
            }
            (CustomerSortBy::Name, SortDirection::Descending) => {
                build().order(customers::name.desc())
            }
            (CustomerSortBy::Status, SortDirection::Ascending) => {
                build().order(customers::status.asc())
            }
            (CustomerSortBy::Status, SortDirection::Descending) => {
                build().order(customers::status.desc())
            }
            (CustomerSortBy::Balance, SortDirection::Ascending) => {
                build().order(customers::balance.asc())
            }
            (CustomerSortBy::Balance, SortDirection::Descending) => {
                build().order(customers::balance.desc())
            }
            (CustomerSortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(customers::created_at.asc())
            }
            (CustomerSortBy::CreatedAt, SortDirection::Descending) => {
                build().order(customers::created_at.desc())
            }
        }
        .then_order_by(customers::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let customers = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(|c| Customer::try_from(c).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, customers))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();
        let affected = diesel::insert_into(customers::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_customer(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateCustomer = updates.into();

        let updated = diesel::update(
            customers::table
                .filter(customers::id.eq(id))
                .filter(customers::org_id.eq(org_id)),
        )
        .set(&db_updates)
        .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(updated).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: i32, org_id: i32) -> RepositoryResult<()> {
        use crate::schema::{customers, inventory_items, tickets};

        let mut conn = self.conn()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            // Equipment goes back to stock; tickets die with the customer.
            // Payments are a ledger and deliberately block deletion via the
            // foreign key when any exist.
            diesel::update(inventory_items::table.filter(inventory_items::customer_id.eq(id)))
                .set((
                    inventory_items::customer_id.eq(None::<i32>),
                    inventory_items::status
                        .eq(crate::domain::inventory::InventoryStatus::InStock.to_string()),
                ))
                .execute(conn)?;
            diesel::delete(tickets::table.filter(tickets::customer_id.eq(id))).execute(conn)?;
            diesel::delete(
                customers::table
                    .filter(customers::id.eq(id))
                    .filter(customers::org_id.eq(org_id)),
            )
            .execute(conn)?;
            Ok(())
        })
        .map_err(RepositoryError::from)
    }
}
