use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inventory::{
    InventoryCategory, InventoryItem as DomainInventoryItem, InventoryStatus,
    NewInventoryItem as DomainNewInventoryItem,
};
use crate::domain::types::TypeConstraintError;
use crate::models::customer::Customer;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Customer, foreign_key = customer_id))]
#[diesel(table_name = crate::schema::inventory_items)]
/// Diesel model for [`crate::domain::inventory::InventoryItem`].
pub struct InventoryItem {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub category: String,
    pub serial: Option<String>,
    pub status: String,
    pub customer_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_items)]
pub struct NewInventoryItem<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub category: String,
    pub serial: Option<&'a str>,
    pub status: String,
}

impl TryFrom<InventoryItem> for DomainInventoryItem {
    type Error = TypeConstraintError;

    fn try_from(item: InventoryItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id,
            org_id: item.org_id,
            name: item.name,
            category: InventoryCategory::try_from(item.category.as_str())?,
            serial: item.serial,
            status: InventoryStatus::try_from(item.status.as_str())?,
            customer_id: item.customer_id,
            created_at: item.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewInventoryItem> for NewInventoryItem<'a> {
    fn from(item: &'a DomainNewInventoryItem) -> Self {
        Self {
            org_id: item.org_id,
            name: item.name.as_str(),
            category: item.category.to_string(),
            serial: item.serial.as_deref(),
            status: InventoryStatus::InStock.to_string(),
        }
    }
}
