// File: src/text.rs
// Purpose: Passthrough text types (single line, multi line, html)

use formwright::{ConversionError, Value, ValueType};

fn text_to_value(scalar: &Value) -> Option<Value> {
    match scalar {
        Value::Null => None,
        other => Some(Value::Text(other.to_display_string())),
    }
}

fn text_to_scalar(value: &Value) -> Result<Value, ConversionError> {
    Ok(match value {
        Value::Null => Value::Null,
        Value::Text(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_display_string()),
    })
}

/// Single-line text, stored verbatim.
pub struct StringType;

impl ValueType for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        text_to_value(scalar)
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        text_to_scalar(value)
    }
}

/// Multi-line text, rendered as a text area.
pub struct TextType;

impl ValueType for TextType {
    fn name(&self) -> &str {
        "text"
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        text_to_value(scalar)
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        text_to_scalar(value)
    }
}

/// Raw markup, rendered as a tall text area.
pub struct HtmlType;

impl ValueType for HtmlType {
    fn name(&self) -> &str {
        "html"
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        text_to_value(scalar)
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        text_to_scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_scalar_has_no_form_value() {
        assert_eq!(StringType.to_value(&Value::Null, 0), None);
    }

    #[test]
    fn test_numbers_become_text() {
        assert_eq!(
            StringType.to_value(&Value::Int(42), 0),
            Some(Value::Text("42".into()))
        );
        assert_eq!(
            StringType.to_scalar(&Value::Int(42), 0).unwrap(),
            Value::Text("42".into())
        );
    }

    #[test]
    fn test_round_trip() {
        let value = StringType.to_value(&Value::Text("hello".into()), 0).unwrap();
        assert_eq!(
            StringType.to_scalar(&value, 0).unwrap(),
            Value::Text("hello".into())
        );
    }
}
