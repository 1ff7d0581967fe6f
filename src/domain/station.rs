use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    Online,
    #[default]
    Offline,
    Maintenance,
}

impl StationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for StationStatus {
    type Error = TypeConstraintError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// A network point of presence (tower, relay, street cabinet).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Station {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub status: StationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewStation {
    pub org_id: i32,
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub status: StationStatus,
}

impl NewStation {
    #[must_use]
    pub fn new(
        org_id: i32,
        name: String,
        location: Option<String>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            org_id,
            name,
            location: location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ip_address: ip_address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: StationStatus::Offline,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateStation {
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub status: StationStatus,
}
