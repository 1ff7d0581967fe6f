use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryCategory {
    Router,
    Antenna,
    Cable,
    #[default]
    Other,
}

impl InventoryCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Antenna => "antenna",
            Self::Cable => "cable",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for InventoryCategory {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "router" => Ok(Self::Router),
            "antenna" => Ok(Self::Antenna),
            "cable" => Ok(Self::Cable),
            "other" => Ok(Self::Other),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    #[default]
    InStock,
    Assigned,
    Faulty,
}

impl InventoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Assigned => "assigned",
            Self::Faulty => "faulty",
        }
    }
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for InventoryStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "assigned" => Ok(Self::Assigned),
            "faulty" => Ok(Self::Faulty),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// A piece of customer-premises or warehouse equipment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct InventoryItem {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub category: InventoryCategory,
    pub serial: Option<String>,
    pub status: InventoryStatus,
    /// Customer currently holding the item.
    pub customer_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewInventoryItem {
    pub org_id: i32,
    pub name: String,
    pub category: InventoryCategory,
    pub serial: Option<String>,
}

impl NewInventoryItem {
    #[must_use]
    pub fn new(
        org_id: i32,
        name: String,
        category: InventoryCategory,
        serial: Option<String>,
    ) -> Self {
        Self {
            org_id,
            name,
            category,
            serial: serial
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
