// File: src/integral.rs
// Purpose: Integer value restricted to a fixed option table

use formwright::{AvailableValues, ConversionError, Value, ValueType};

/// Integer scalar constrained to an `(value, label)` option table.
///
/// Anything outside the table never reaches storage.
pub struct IntegralOptionType {
    options_table: Vec<(i64, String)>,
}

impl IntegralOptionType {
    pub fn new(options_table: Vec<(i64, String)>) -> Self {
        Self { options_table }
    }

    fn contains(&self, number: i64) -> bool {
        self.options_table.iter().any(|(value, _)| *value == number)
    }
}

impl ValueType for IntegralOptionType {
    fn name(&self) -> &str {
        "integral_option"
    }

    fn available_values(&self, _options: u32) -> Option<AvailableValues> {
        Some(AvailableValues::Inline(
            self.options_table
                .iter()
                .map(|(value, label)| (Value::Int(*value), label.clone()))
                .collect(),
        ))
    }

    fn to_value(&self, scalar: &Value, _options: u32) -> Option<Value> {
        scalar
            .as_int()
            .filter(|n| self.contains(*n))
            .map(Value::Int)
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        value
            .as_int()
            .filter(|n| self.contains(*n))
            .map(Value::Int)
            .ok_or_else(|| ConversionError::new("Not one of the allowed options"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priority() -> IntegralOptionType {
        IntegralOptionType::new(vec![
            (10, "Low".to_string()),
            (20, "Normal".to_string()),
            (30, "High".to_string()),
        ])
    }

    #[test]
    fn test_table_membership() {
        let t = priority();
        assert_eq!(t.to_value(&Value::Int(20), 0), Some(Value::Int(20)));
        assert_eq!(t.to_value(&Value::Int(25), 0), None);
    }

    #[test]
    fn test_rejects_values_outside_table() {
        let t = priority();
        assert_eq!(t.to_scalar(&Value::Int(30), 0).unwrap(), Value::Int(30));
        assert!(t.to_scalar(&Value::Int(25), 0).is_err());
        assert!(t.to_scalar(&Value::Text("High".into()), 0).is_err());
    }
}
