use serde::Deserialize;
use validator::Validate;

use crate::domain::billing::PaymentMethod;
use crate::domain::types::parse_money;
use crate::forms::{FormError, empty_string_as_none};

#[derive(Deserialize, Validate)]
/// Form data for recording a payment against a customer account.
pub struct RecordPaymentForm {
    pub customer_id: i32,
    /// Provider transaction being reconciled, when the payment came
    /// through M-Pesa or KopoKopo.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub transaction_id: Option<i32>,
    pub method: String,
    /// Amount in shillings, e.g. "1500" or "1500.50".
    #[validate(length(min = 1))]
    pub amount: String,
    pub note: Option<String>,
}

impl RecordPaymentForm {
    pub fn method(&self) -> Result<PaymentMethod, FormError> {
        PaymentMethod::try_from(self.method.as_str()).map_err(|_| FormError::InvalidStatus)
    }

    /// Parsed amount in cents; zero and negative amounts are rejected.
    pub fn amount_cents(&self) -> Result<i64, FormError> {
        let cents = parse_money(&self.amount).map_err(|_| FormError::InvalidAmount)?;
        if cents <= 0 {
            return Err(FormError::InvalidAmount);
        }
        Ok(cents)
    }

    pub fn note(&self) -> Option<String> {
        self.note
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
