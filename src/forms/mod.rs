//! Form definitions backing the routes.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use validator::ValidationErrors;

pub mod billing;
pub mod customers;
pub mod inventory;
pub mod packages;
pub mod stations;
pub mod tickets;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("invalid csv file: {0}")]
    InvalidCsv(String),
}

/// Deserializes `""` (what HTML selects and inputs submit for "no value")
/// as `None` instead of a parse error.
pub(crate) fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}
