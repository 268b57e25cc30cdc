// File: src/boolean.rs
// Purpose: Boolean type backed by a 0/1 scalar

use formwright::{AvailableValues, ConversionError, Value, ValueType};

/// Yes/no value stored as `0`/`1`.
///
/// The form domain is also `0`/`1` so the selection control's option table
/// and the converted value line up.
pub struct BooleanType {
    no_label: String,
    yes_label: String,
}

impl BooleanType {
    pub fn new() -> Self {
        Self::with_labels("No", "Yes")
    }

    pub fn with_labels(no_label: impl Into<String>, yes_label: impl Into<String>) -> Self {
        Self {
            no_label: no_label.into(),
            yes_label: yes_label.into(),
        }
    }
}

impl Default for BooleanType {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueType for BooleanType {
    fn name(&self) -> &str {
        "boolean"
    }

    fn available_values(&self, _options: u32) -> Option<AvailableValues> {
        Some(AvailableValues::Inline(vec![
            (Value::Int(0), self.no_label.clone()),
            (Value::Int(1), self.yes_label.clone()),
        ]))
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        match scalar {
            Value::Null => None,
            other => Some(Value::Int(if other.to_bool() { 1 } else { 0 })),
        }
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        let truthy = match value {
            Value::Bool(b) => *b,
            Value::Int(n) if *n == 0 || *n == 1 => *n == 1,
            Value::Text(s) if s == "0" || s == "false" => false,
            Value::Text(s) if s == "1" || s == "true" => true,
            _ => return Err(ConversionError::new("Not a yes/no value")),
        };
        Ok(Value::Int(if truthy { 1 } else { 0 }))
    }
}
