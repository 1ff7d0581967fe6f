use serde::Deserialize;
use validator::Validate;

use crate::domain::package::{NewPackage, UpdatePackage};
use crate::domain::types::parse_money;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for creating a service package.
pub struct AddPackageForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub download_mbps: i32,
    #[validate(range(min = 1))]
    pub upload_mbps: i32,
    /// Monthly fee in shillings, e.g. "2500" or "2500.00".
    pub monthly_fee: String,
}

impl AddPackageForm {
    pub fn to_new_package(&self, org_id: i32) -> Result<NewPackage, FormError> {
        let monthly_fee = parse_money(&self.monthly_fee).map_err(|_| FormError::InvalidAmount)?;
        Ok(NewPackage {
            org_id,
            name: self.name.trim().to_string(),
            download_mbps: self.download_mbps,
            upload_mbps: self.upload_mbps,
            monthly_fee,
        })
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating a service package.
pub struct SavePackageForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub download_mbps: i32,
    #[validate(range(min = 1))]
    pub upload_mbps: i32,
    pub monthly_fee: String,
}

impl SavePackageForm {
    pub fn to_updates(&self) -> Result<UpdatePackage, FormError> {
        let monthly_fee = parse_money(&self.monthly_fee).map_err(|_| FormError::InvalidAmount)?;
        Ok(UpdatePackage {
            name: self.name.trim().to_string(),
            download_mbps: self.download_mbps,
            upload_mbps: self.upload_mbps,
            monthly_fee,
        })
    }
}
