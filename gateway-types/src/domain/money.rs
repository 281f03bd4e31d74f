//! Monetary primitives: currency codes and minor-unit amounts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ValidationError;

/// ISO-4217 style currency code, always stored uppercase.
///
/// Only the shape is checked (three ASCII letters). Whether the provider
/// actually supports the currency is the provider's decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code (`"usd"` becomes `"USD"`).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.len() != 3 || !raw.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads a currency code from an untyped JSON field.
pub(crate) fn currency_field(value: Option<&Value>) -> Result<CurrencyCode, ValidationError> {
    match value {
        None => Err(ValidationError::Missing("currency")),
        Some(Value::String(s)) => CurrencyCode::parse(s),
        Some(_) => Err(ValidationError::InvalidCurrency),
    }
}

/// Reads an amount in minor units (cents, paise, ...) from an untyped JSON field.
///
/// Only JSON integers that fit in an `i64` are accepted; `10.5`, `"10"` and
/// `true` are all rejected.
pub(crate) fn amount_field(value: Option<&Value>) -> Result<i64, ValidationError> {
    match value {
        None => Err(ValidationError::Missing("amount")),
        Some(Value::Number(n)) => n.as_i64().ok_or(ValidationError::NotAnInteger("amount")),
        Some(_) => Err(ValidationError::NotAnInteger("amount")),
    }
}

/// Reads a required, non-blank string field. The result is trimmed.
pub(crate) fn string_field(
    field: &'static str,
    value: Option<&Value>,
) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}
