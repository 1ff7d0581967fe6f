//! Services backing the packages screen.

use validator::Validate;

use crate::domain::activity::NewActivity;
use crate::dto::packages::PackagesPageData;
use crate::forms::packages::{AddPackageForm, SavePackageForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ActivityWriter, PackageReader, PackageWriter};
use crate::services::{ServiceError, ServiceResult, record_activity};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads all service packages of the organization.
pub fn load_packages_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<PackagesPageData>
where
    R: PackageReader + ?Sized,
{
    if !user.has_role(SERVICE_ACCESS_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let packages = repo.list_packages(user.org_id)?;
    Ok(PackagesPageData { packages })
}

/// Validates and persists a new service package.
pub fn add_package<R>(repo: &R, user: &AuthenticatedUser, form: AddPackageForm) -> ServiceResult<()>
where
    R: PackageWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    let new_package = form
        .to_new_package(user.org_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_package(&new_package).map_err(|err| {
        log::error!("Failed to add package: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "package.created")
            .entity("package", created.id)
            .detail(created.name),
    );

    Ok(())
}

/// Applies the save form to an existing package.
pub fn save_package<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SavePackageForm,
) -> ServiceResult<()>
where
    R: PackageReader + PackageWriter + ActivityWriter + ?Sized,
{
    if !user.has_role(SERVICE_ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Form validation failed".to_string()));
    }

    repo.get_package_by_id(form.id, user.org_id)?
        .ok_or(ServiceError::NotFound)?;

    let updates = form
        .to_updates()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.update_package(form.id, user.org_id, &updates).map_err(|err| {
        log::error!("Failed to update package: {err}");
        err
    })?;

    record_activity(
        repo,
        &NewActivity::new(user.org_id, &user.email, "package.updated")
            .entity("package", updated.id),
    );

    Ok(())
}
