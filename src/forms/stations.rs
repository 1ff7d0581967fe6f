use serde::Deserialize;
use validator::Validate;

use crate::domain::station::{NewStation, StationStatus, UpdateStation};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for registering a station.
pub struct AddStationForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
}

impl AddStationForm {
    pub fn to_new_station(self, org_id: i32) -> NewStation {
        NewStation::new(org_id, self.name, self.location, self.ip_address)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating a station.
pub struct SaveStationForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub status: String,
}

impl SaveStationForm {
    pub fn to_updates(&self) -> Result<UpdateStation, FormError> {
        let status =
            StationStatus::try_from(self.status.as_str()).map_err(|_| FormError::InvalidStatus)?;
        Ok(UpdateStation {
            name: self.name.trim().to_string(),
            location: self
                .location
                .clone()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            ip_address: self
                .ip_address
                .clone()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
        })
    }
}
