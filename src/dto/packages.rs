//! DTOs for the packages screen.

use serde::Serialize;

use crate::domain::package::Package;

#[derive(Debug, Serialize)]
pub struct PackagesPageData {
    pub packages: Vec<Package>,
}
