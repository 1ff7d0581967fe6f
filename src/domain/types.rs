//! Value normalization shared by domain entities.
//!
//! Constructors here enforce basic invariants (validated email, E.164
//! phone numbers, sanitized rich text, well-formed money amounts) so that
//! once a value reaches the domain layer it can be treated as trusted.

use std::fmt::{Display, Formatter};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Money amount could not be parsed or was out of range.
    #[error("invalid amount")]
    InvalidAmount,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Normalizes and validates an email string.
pub fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Lenient phone normalization used when importing records: E.164 when the
/// number parses, the trimmed input otherwise.
pub fn normalize_phone_lenient(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(normalize_phone_to_e164(trimmed).unwrap_or_else(|_| trimmed.to_string()))
}

/// Parses a decimal shilling amount ("1250", "1250.50") into cents.
pub fn parse_money(value: &str) -> Result<i64, TypeConstraintError> {
    let trimmed = value.trim().replace(',', "");
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed.as_str(), ""),
    };

    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(TypeConstraintError::InvalidAmount);
    }

    let negative = whole.starts_with('-');
    let whole: i64 = whole.parse().map_err(|_| TypeConstraintError::InvalidAmount)?;
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| TypeConstraintError::InvalidAmount)? * 10,
        _ => frac.parse().map_err(|_| TypeConstraintError::InvalidAmount)?,
    };

    whole
        .checked_mul(100)
        .and_then(|w| {
            if negative {
                w.checked_sub(frac_cents)
            } else {
                w.checked_add(frac_cents)
            }
        })
        .ok_or(TypeConstraintError::InvalidAmount)
}

/// Formats cents as a shilling amount with thousands separators.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac:02}")
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Free text that passed through HTML sanitation, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SanitizedText(String);

impl SanitizedText {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let cleaned = ammonia::clean(&value.into());
        let inner = NonEmptyString::new(cleaned)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SanitizedText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SanitizedText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_validated() {
        assert_eq!(
            normalize_email("  John@Example.COM "),
            Ok("john@example.com".to_string())
        );
        assert_eq!(
            normalize_email("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn phone_normalizes_to_e164() {
        assert_eq!(
            normalize_phone_to_e164("+254 712 345678"),
            Ok("+254712345678".to_string())
        );
        assert!(normalize_phone_to_e164("").is_err());
    }

    #[test]
    fn money_parses_and_formats() {
        assert_eq!(parse_money("1250"), Ok(125_000));
        assert_eq!(parse_money("1,250.50"), Ok(125_050));
        assert_eq!(parse_money("0.5"), Ok(50));
        assert!(parse_money("12.345").is_err());
        assert!(parse_money("abc").is_err());

        assert_eq!(format_money(125_050), "1,250.50");
        assert_eq!(format_money(50), "0.50");
        assert_eq!(format_money(-125_000), "-1,250.00");
    }

    #[test]
    fn sanitized_text_strips_markup() {
        let text = SanitizedText::new("hello <script>alert(1)</script>world").unwrap();
        assert!(!text.as_str().contains("script"));
        assert!(SanitizedText::new("   ").is_err());
    }
}
