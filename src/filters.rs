//! Custom Tera filters: pure value-to-cell formatting for templates.

use std::collections::HashMap;

use tera::{Result, Value, to_value};

use crate::domain::types::format_money;

/// Renders integer cents as a shilling amount, e.g. `125050` → `1,250.50`.
pub fn money(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let cents = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("money filter expects an integer amount in cents"))?;

    Ok(to_value(format_money(cents))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cents_as_shillings() {
        let args = HashMap::new();
        let out = money(&Value::from(125_050), &args).unwrap();
        assert_eq!(out, Value::from("1,250.50"));
    }

    #[test]
    fn rejects_non_numeric_values() {
        let args = HashMap::new();
        assert!(money(&Value::from("not a number"), &args).is_err());
    }
}
