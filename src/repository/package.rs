//! Repository implementation for service packages.

use diesel::prelude::*;

use crate::domain::package::{NewPackage, Package, UpdatePackage};
use crate::models::package::{
    NewPackage as DbNewPackage, Package as DbPackage, UpdatePackage as DbUpdatePackage,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, PackageReader, PackageWriter};

impl PackageReader for DieselRepository {
    fn get_package_by_id(&self, id: i32, org_id: i32) -> RepositoryResult<Option<Package>> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let package = packages::table
            .filter(packages::id.eq(id))
            .filter(packages::org_id.eq(org_id))
            .first::<DbPackage>(&mut conn)
            .optional()?;

        Ok(package.map(Into::into))
    }

    fn list_packages(&self, org_id: i32) -> RepositoryResult<Vec<Package>> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let packages = packages::table
            .filter(packages::org_id.eq(org_id))
            .order(packages::monthly_fee.asc())
            .load::<DbPackage>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(packages)
    }
}

impl PackageWriter for DieselRepository {
    fn create_package(&self, new_package: &NewPackage) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_new: DbNewPackage = new_package.into();

        let created = diesel::insert_into(packages::table)
            .values(&db_new)
            .get_result::<DbPackage>(&mut conn)?;

        Ok(created.into())
    }

    fn update_package(
        &self,
        id: i32,
        org_id: i32,
        updates: &UpdatePackage,
    ) -> RepositoryResult<Package> {
        use crate::schema::packages;

        let mut conn = self.conn()?;
        let db_updates: DbUpdatePackage = updates.into();

        let updated = diesel::update(
            packages::table
                .filter(packages::id.eq(id))
                .filter(packages::org_id.eq(org_id)),
        )
        .set(&db_updates)
        .get_result::<DbPackage>(&mut conn)?;

        Ok(updated.into())
    }
}
