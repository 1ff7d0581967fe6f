use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use std::io::Read;
use validator::Validate;

use crate::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use crate::forms::{FormError, empty_string_as_none};

#[derive(Deserialize, Validate)]
/// Form data for creating a customer.
pub struct AddCustomerForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub package_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub station_id: Option<i32>,
}

impl AddCustomerForm {
    pub fn to_new_customer(self, org_id: i32) -> NewCustomer {
        NewCustomer::new(
            org_id,
            self.name,
            self.email,
            self.phone,
            self.address,
            self.package_id,
            self.station_id,
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing customer.
pub struct SaveCustomerForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub package_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub station_id: Option<i32>,
}

impl SaveCustomerForm {
    pub fn to_updates(&self) -> Result<UpdateCustomer, FormError> {
        let status =
            CustomerStatus::try_from(self.status.as_str()).map_err(|_| FormError::InvalidStatus)?;
        Ok(UpdateCustomer::new(
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
            status,
            self.package_id,
            self.station_id,
        ))
    }
}

#[derive(Deserialize)]
/// Form data for deleting a customer.
pub struct DeleteCustomerForm {
    pub id: i32,
}

#[derive(MultipartForm)]
/// CSV bulk import of customers.
pub struct UploadCustomersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadCustomersForm {
    /// Parses the uploaded CSV into customer records.
    ///
    /// Recognized headers: `name`, `email`, `phone`, `address`. Rows with
    /// an empty name are rejected rather than silently skipped.
    pub fn parse(&mut self, org_id: i32) -> Result<Vec<NewCustomer>, FormError> {
        let mut raw = String::new();
        self.csv
            .file
            .read_to_string(&mut raw)
            .map_err(|e| FormError::InvalidCsv(e.to_string()))?;

        let mut rdr = csv::Reader::from_reader(raw.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| FormError::InvalidCsv(e.to_string()))?
            .clone();

        let mut customers = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| FormError::InvalidCsv(e.to_string()))?;

            let mut name = None;
            let mut email = None;
            let mut phone = None;
            let mut address = None;

            for (i, field) in record.iter().enumerate() {
                match headers.get(i) {
                    Some("name") => name = Some(field.to_string()),
                    Some("email") => email = Some(field.to_string()),
                    Some("phone") => phone = Some(field.to_string()),
                    Some("address") => address = Some(field.to_string()),
                    _ => continue,
                }
            }

            let name = name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .ok_or_else(|| FormError::InvalidCsv(format!("row {}: missing name", line + 2)))?;

            customers.push(NewCustomer::new(
                org_id, name, email, phone, address, None, None,
            ));
        }

        Ok(customers)
    }
}
