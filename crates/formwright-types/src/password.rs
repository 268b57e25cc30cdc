// File: src/password.rs
// Purpose: Password type with a minimum-length requirement

use formwright::validation::{MinLengthValidator, Validator};
use formwright::{ConversionError, Value, ValueType};
use std::rc::Rc;

/// Password field.
///
/// The stored scalar is never rendered back into the form, so `to_value`
/// always yields nothing.
pub struct PasswordType {
    min_length: usize,
}

impl PasswordType {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for PasswordType {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ValueType for PasswordType {
    fn name(&self) -> &str {
        "password"
    }

    fn to_value(&self, _scalar: &Value, _options: u32) -> Option<Value> {
        None
    }

    fn to_scalar(&self, value: &Value, _options: u32) -> Result<Value, ConversionError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Text(s) => Ok(Value::Text(s.clone())),
            _ => Err(ConversionError::new("Not a valid password")),
        }
    }

    fn validators(&self) -> Vec<Rc<dyn Validator>> {
        vec![Rc::new(MinLengthValidator::new(self.min_length))]
    }
}
