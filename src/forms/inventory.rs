use serde::Deserialize;
use validator::Validate;

use crate::domain::inventory::{InventoryCategory, NewInventoryItem};
use crate::forms::{FormError, empty_string_as_none};

#[derive(Deserialize, Validate)]
/// Form data for adding an inventory item.
pub struct AddItemForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub category: String,
    pub serial: Option<String>,
}

impl AddItemForm {
    pub fn to_new_item(self, org_id: i32) -> Result<NewInventoryItem, FormError> {
        let category = InventoryCategory::try_from(self.category.as_str())
            .map_err(|_| FormError::InvalidStatus)?;
        Ok(NewInventoryItem::new(org_id, self.name, category, self.serial))
    }
}

#[derive(Deserialize)]
/// Assignment submitted from the inventory table; an empty customer puts
/// the item back in stock.
pub struct AssignItemForm {
    pub id: i32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub customer_id: Option<i32>,
}
