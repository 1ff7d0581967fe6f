use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerStatus, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub org_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
    pub balance: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub org_id: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: String,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub status: String,
    pub package_id: Option<i32>,
    pub station_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: customer.id,
            org_id: customer.org_id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            status: CustomerStatus::try_from(customer.status.as_str())?,
            package_id: customer.package_id,
            station_id: customer.station_id,
            balance: customer.balance,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            org_id: customer.org_id,
            name: customer.name.as_str(),
            email: customer.email.as_deref(),
            phone: customer.phone.as_deref(),
            address: customer.address.as_deref(),
            status: customer.status.to_string(),
            package_id: customer.package_id,
            station_id: customer.station_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainUpdateCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            email: customer.email.as_deref(),
            phone: customer.phone.as_deref(),
            address: customer.address.as_deref(),
            status: customer.status.to_string(),
            package_id: customer.package_id,
            station_id: customer.station_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewCustomer::new(
            1,
            "Jane Wanjiku".to_string(),
            Some(" Jane@Example.COM ".to_string()),
            Some("+254712345678".to_string()),
            Some("Nakuru".to_string()),
            Some(3),
            None,
        );
        let new: NewCustomer = (&domain).into();
        assert_eq!(new.org_id, 1);
        assert_eq!(new.email, Some("jane@example.com"));
        assert_eq!(new.phone, Some("+254712345678"));
        assert_eq!(new.status, "active");
        assert_eq!(new.package_id, Some(3));
    }

    #[test]
    fn customer_into_domain_parses_status() {
        let now = Utc::now().naive_utc();
        let db = Customer {
            id: 1,
            org_id: 2,
            name: "n".to_string(),
            email: None,
            phone: None,
            address: None,
            status: "suspended".to_string(),
            package_id: None,
            station_id: None,
            balance: -5000,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainCustomer::try_from(db).unwrap();
        assert_eq!(domain.status, CustomerStatus::Suspended);
        assert_eq!(domain.balance, -5000);
        assert_eq!(domain.email, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Customer {
            id: 1,
            org_id: 2,
            name: "n".to_string(),
            email: None,
            phone: None,
            address: None,
            status: "zombie".to_string(),
            package_id: None,
            station_id: None,
            balance: 0,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainCustomer::try_from(db).is_err());
    }
}
