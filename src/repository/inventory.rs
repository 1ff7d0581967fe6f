//! Repository implementation for inventory items.

use diesel::prelude::*;

use crate::collection::SortDirection;
use crate::domain::inventory::{InventoryItem, InventoryStatus, NewInventoryItem};
use crate::models::inventory::{
    InventoryItem as DbInventoryItem, NewInventoryItem as DbNewInventoryItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, InventoryListQuery, InventoryReader, InventorySortBy, InventoryWriter,
};

impl InventoryReader for DieselRepository {
    fn get_item_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<InventoryItem>> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;
        let item = inventory_items::table
            .filter(inventory_items::id.eq(id))
            .filter(inventory_items::org_id.eq(org_id))
            .first::<DbInventoryItem>(&mut conn)
            .optional()?;

        match item {
            Some(item) => Ok(Some(
                InventoryItem::try_from(item).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_inventory(
        &self,
        query: InventoryListQuery,
    ) -> RepositoryResult<(usize, Vec<InventoryItem>)> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;

        let build = || {
            let mut items = inventory_items::table
                .filter(inventory_items::org_id.eq(query.org_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category) = query.category {
                items = items.filter(inventory_items::category.eq(category.to_string()));
            }
            if let Some(status) = query.status {
                items = items.filter(inventory_items::status.eq(status.to_string()));
            }
            if let Some(search) = &query.search {
                let pattern = format!("%{search}%");
                items = items.filter(
                    inventory_items::name
                        .like(pattern.clone())
                        .nullable()
                        .or(inventory_items::serial.like(pattern)),
                );
            }
            items
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let (by, dir) = query
            .sort
            .unwrap_or((InventorySortBy::Name, SortDirection::Ascending));
        let mut items = match (by, dir) {
            (InventorySortBy::Name, SortDirection::Ascending) => {
                build().order(inventory_items::name.asc())
            }
            (InventorySortBy::Name, SortDirection::Descending) => {
                build().order(inventory_items::name.desc())
            }
            (InventorySortBy::Category, SortDirection::Ascending) => {
                build().order(inventory_items::category.asc())
            }
            (InventorySortBy::Category, SortDirection::Descending) => {
                build().order(inventory_items::category.desc())
            }
            (InventorySortBy::Status, SortDirection::Ascending) => {
                build().order(inventory_items::status.asc())
            }
            (InventorySortBy::Status, SortDirection::Descending) => {
                build().order(inventory_items::status.desc())
            }
            (InventorySortBy::CreatedAt, SortDirection::Ascending) => {
                build().order(inventory_items::created_at.asc())
            }
            (InventorySortBy::CreatedAt, SortDirection::Descending) => {
                build().order(inventory_items::created_at.desc())
            }
        }
        .then_order_by(inventory_items::id.asc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let inventory = items
            .load::<DbInventoryItem>(&mut conn)?
            .into_iter()
            .map(|i| InventoryItem::try_from(i).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, inventory))
    }
}

impl InventoryWriter for DieselRepository {
    fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem> {
        use crate::schema::inventory_items;

        let mut conn = self.conn()?;
        let db_new: DbNewInventoryItem = new_item.into();

        let created = diesel::insert_into(inventory_items::table)
            .values(&db_new)
            .get_result::<DbInventoryItem>(&mut conn)?;

        InventoryItem::try_from(created).map_err(RepositoryError::from)
    }

    fn assign_item(
        &self,
        id: i32,
        org_id: i32,
        customer_id: Option<i32>,
    ) -> RepositoryResult<InventoryItem> {
        use crate::schema::inventory_items;

        let status = if customer_id.is_some() {
            InventoryStatus::Assigned
        } else {
            InventoryStatus::InStock
        };

        let mut conn = self.conn()?;
        let updated = diesel::update(
            inventory_items::table
                .filter(inventory_items::id.eq(id))
                .filter(inventory_items::org_id.eq(org_id)),
        )
        .set((
            inventory_items::customer_id.eq(customer_id),
            inventory_items::status.eq(status.to_string()),
        ))
        .get_result::<DbInventoryItem>(&mut conn)?;

        InventoryItem::try_from(updated).map_err(RepositoryError::from)
    }
}
