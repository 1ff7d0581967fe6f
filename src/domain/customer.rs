use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, normalize_phone_lenient};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Suspended,
    Disconnected,
}

impl CustomerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for CustomerStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "disconnected" => Ok(Self::Disconnected),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Customer {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
    /// Account balance in cents; negative means the customer owes money.
    pub balance: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub org_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        org_id: i32,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        package_id: Option<i32>,
        station_id: Option<i32>,
    ) -> Self {
        Self {
            org_id,
            name,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone.as_deref().and_then(normalize_phone_lenient),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: CustomerStatus::Active,
            package_id,
            station_id,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        status: CustomerStatus,
        package_id: Option<i32>,
        station_id: Option<i32>,
    ) -> Self {
        Self {
            name,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone.as_deref().and_then(normalize_phone_lenient),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
            package_id,
            station_id,
        }
    }
}
