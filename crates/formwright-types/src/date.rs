// File: src/date.rs
// Purpose: ISO date type backed by chrono parsing

use chrono::NaiveDate;
use formwright::{ConversionError, Value, ValueType};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Calendar date stored as an ISO `YYYY-MM-DD` string.
///
/// The form domain is the same ISO string (what a date input submits and
/// displays); the conversion normalizes and rejects impossible dates.
pub struct DateType;

impl DateType {
    fn parse(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, ISO_FORMAT).ok()
    }
}

impl ValueType for DateType {
    fn name(&self) -> &str {
        "date"
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        let text = scalar.as_text()?;
        Self::parse(text).map(|date| Value::Text(date.format(ISO_FORMAT).to_string()))
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Text(s) if s.is_empty() => Ok(Value::Null),
            Value::Text(s) => Self::parse(s)
                .map(|date| Value::Text(date.format(ISO_FORMAT).to_string()))
                .ok_or_else(|| ConversionError::new("Not a valid date (expected YYYY-MM-DD)")),
            _ => Err(ConversionError::new("Not a valid date (expected YYYY-MM-DD)")),
        }
    }
}
