use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::station::{
    NewStation as DomainNewStation, Station as DomainStation, StationStatus,
    UpdateStation as DomainUpdateStation,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::stations)]
/// Diesel model for [`crate::domain::station::Station`].
pub struct Station {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stations)]
pub struct NewStation<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub location: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub status: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::stations)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateStation<'a> {
    pub name: &'a str,
    pub location: Option<&'a str>,
    pub ip_address: Option<&'a str>,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Station> for DomainStation {
    type Error = TypeConstraintError;

    fn try_from(station: Station) -> Result<Self, Self::Error> {
        Ok(Self {
            id: station.id,
            org_id: station.org_id,
            name: station.name,
            location: station.location,
            ip_address: station.ip_address,
            status: StationStatus::try_from(station.status.as_str())?,
            created_at: station.created_at,
            updated_at: station.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewStation> for NewStation<'a> {
    fn from(station: &'a DomainNewStation) -> Self {
        Self {
            org_id: station.org_id,
            name: station.name.as_str(),
            location: station.location.as_deref(),
            ip_address: station.ip_address.as_deref(),
            status: station.status.to_string(),
        }
    }
}

impl<'a> From<&'a DomainUpdateStation> for UpdateStation<'a> {
    fn from(station: &'a DomainUpdateStation) -> Self {
        Self {
            name: station.name.as_str(),
            location: station.location.as_deref(),
            ip_address: station.ip_address.as_deref(),
            status: station.status.to_string(),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
