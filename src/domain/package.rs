use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A service plan customers subscribe to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Package {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    /// Monthly fee in cents.
    pub monthly_fee: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPackage {
    pub org_id: i32,
    pub name: String,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_fee: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdatePackage {
    pub name: String,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_fee: i64,
}
