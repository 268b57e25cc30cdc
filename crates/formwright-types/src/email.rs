// File: src/email.rs
// Purpose: Email address type contributing a format validator

use formwright::validation::{EmailFormatValidator, Validator};
use formwright::{ConversionError, Value, ValueType};
use std::rc::Rc;

/// Email address stored verbatim; the contributed validator rejects
/// malformed submissions before conversion runs.
pub struct EmailType;

impl ValueType for EmailType {
    fn name(&self) -> &str {
        "email"
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        match scalar {
            Value::Null => None,
            other => Some(Value::Text(other.to_display_string())),
        }
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Text(s) => Ok(Value::Text(s.clone())),
            _ => Err(ConversionError::new("Not a valid email address")),
        }
    }

    fn validators(&self) -> Vec<Rc<dyn Validator>> {
        vec![Rc::new(EmailFormatValidator)]
    }
}
