use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::package::{
    NewPackage as DomainNewPackage, Package as DomainPackage, UpdatePackage as DomainUpdatePackage,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::packages)]
/// Diesel model for [`crate::domain::package::Package`].
pub struct Package {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_fee: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::packages)]
pub struct NewPackage<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_fee: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::packages)]
pub struct UpdatePackage<'a> {
    pub name: &'a str,
    pub download_mbps: i32,
    pub upload_mbps: i32,
    pub monthly_fee: i64,
}

impl From<Package> for DomainPackage {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            org_id: package.org_id,
            name: package.name,
            download_mbps: package.download_mbps,
            upload_mbps: package.upload_mbps,
            monthly_fee: package.monthly_fee,
            created_at: package.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPackage> for NewPackage<'a> {
    fn from(package: &'a DomainNewPackage) -> Self {
        Self {
            org_id: package.org_id,
            name: package.name.as_str(),
            download_mbps: package.download_mbps,
            upload_mbps: package.upload_mbps,
            monthly_fee: package.monthly_fee,
        }
    }
}

impl<'a> From<&'a DomainUpdatePackage> for UpdatePackage<'a> {
    fn from(package: &'a DomainUpdatePackage) -> Self {
        Self {
            name: package.name.as_str(),
            download_mbps: package.download_mbps,
            upload_mbps: package.upload_mbps,
            monthly_fee: package.monthly_fee,
        }
    }
}
