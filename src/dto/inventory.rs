//! DTOs for the inventory screen.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;
use crate::domain::inventory::InventoryItem;
use crate::pagination::Paginated;

#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InventoryPageData {
    pub items: Paginated<InventoryItem>,
    /// Customers an item can be assigned to.
    pub customers: Vec<Customer>,
    pub search_query: Option<String>,
    pub category_filter: Option<String>,
    pub status_filter: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
